//! Update flow sequencing: check, confirm, install, relaunch

use super::{Presenter, ProgressCallback, ProgressReport, TriggerHandle, UpdateProvider};
use crate::constants::{MSG_PREPARING, RELAUNCH_SETTLE_DELAY, STARTUP_CHECK_DELAY};
use crate::types::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Drives one update flow at a time against an injected provider and presenter.
///
/// Cheap to clone; clones share state, so a clone handed to a background
/// task observes the same single-flight flag as the UI's copy.
#[derive(Clone)]
pub struct UpdateController {
    provider: Arc<dyn UpdateProvider>,
    presenter: Arc<dyn Presenter>,
    trigger: TriggerHandle,
    state: Arc<Mutex<UpdateFlowState>>,
    in_flight: Arc<AtomicBool>,
    startup_delay: Duration,
    settle_delay: Duration,
}

/// Clears the in-flight flag on every exit path
struct FlightGuard(Arc<AtomicBool>);

impl FlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl UpdateController {
    pub fn new(
        provider: Arc<dyn UpdateProvider>,
        presenter: Arc<dyn Presenter>,
        trigger: TriggerHandle,
    ) -> Self {
        Self {
            provider,
            presenter,
            trigger,
            state: Arc::new(Mutex::new(UpdateFlowState::Idle)),
            in_flight: Arc::new(AtomicBool::new(false)),
            startup_delay: STARTUP_CHECK_DELAY,
            settle_delay: RELAUNCH_SETTLE_DELAY,
        }
    }

    pub fn with_delays(mut self, startup_delay: Duration, settle_delay: Duration) -> Self {
        self.startup_delay = startup_delay;
        self.settle_delay = settle_delay;
        self
    }

    pub fn state(&self) -> UpdateFlowState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn trigger(&self) -> &TriggerHandle {
        &self.trigger
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn set_state(&self, next: UpdateFlowState) {
        set_flow_state(&self.state, next);
    }

    /// Schedule a single background check after the startup delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn auto_check_for_updates(&self) -> JoinHandle<CheckOutcome> {
        let controller = self.clone();
        debug!(delay_ms = self.startup_delay.as_millis() as u64, "Scheduling startup update check");
        tokio::spawn(async move {
            tokio::time::sleep(controller.startup_delay).await;
            controller.check_for_updates(false).await
        })
    }

    /// Run the whole flow once. Never fails: errors end as a reset trigger
    /// plus, where appropriate, an error toast.
    pub async fn check_for_updates(&self, notify_if_none: bool) -> CheckOutcome {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            debug!("Update flow already running, rejecting new check");
            if notify_if_none {
                self.presenter
                    .toast("An update is already being checked", ToastKind::Info);
            }
            return CheckOutcome::AlreadyRunning;
        };

        self.trigger.set(TriggerState::Checking);
        self.set_state(UpdateFlowState::Checking);
        info!(notify_if_none, "Checking for updates");

        let info = match self.provider.check().await {
            Ok(Some(info)) if info.available => info,
            Ok(_) => {
                debug!("App is up to date");
                self.reset();
                if notify_if_none {
                    self.presenter
                        .toast("You're on the latest version", ToastKind::Info);
                }
                return CheckOutcome::UpToDate;
            }
            Err(e) => {
                warn!(error = %e, "Update check failed");
                self.set_state(UpdateFlowState::Failed);
                self.reset();
                if notify_if_none {
                    self.presenter
                        .toast(&format!("Update check failed: {}", e), ToastKind::Error);
                }
                return CheckOutcome::Failed(e.to_string());
            }
        };

        info!(version = %info.version, "App update available");
        self.set_state(UpdateFlowState::UpdateAvailable);
        self.trigger.set(TriggerState::HasUpdate);

        if self.presenter.confirm_update(&info).await == Decision::Decline {
            info!(version = %info.version, "Update declined");
            self.reset();
            return CheckOutcome::Declined;
        }

        self.install(info).await
    }

    async fn install(&self, info: UpdateInfo) -> CheckOutcome {
        info!(version = %info.version, "Starting app update download");
        self.set_state(UpdateFlowState::Downloading);
        self.presenter.show_progress();
        self.presenter.set_progress(Some(0.0), MSG_PREPARING);

        let presenter = self.presenter.clone();
        let state = self.state.clone();
        let on_event: ProgressCallback = Box::new(move |event| {
            if event == ProgressEvent::Finished {
                debug!("Update download finished");
                set_flow_state(&state, UpdateFlowState::Installing);
            }
            let report = ProgressReport::from_event(event);
            presenter.set_progress(report.percent, &report.text);
        });

        if let Err(e) = self.provider.download_and_install(on_event).await {
            error!(error = %e, version = %info.version, "App update failed");
            self.presenter.hide_progress();
            self.set_state(UpdateFlowState::Failed);
            self.reset();
            self.presenter
                .toast(&format!("Update failed: {}", e), ToastKind::Error);
            return CheckOutcome::Failed(e.to_string());
        }

        self.set_state(UpdateFlowState::Installing);
        info!(
            version = %info.version,
            settle_ms = self.settle_delay.as_millis() as u64,
            "Update installed, relaunching after settle delay"
        );
        tokio::time::sleep(self.settle_delay).await;

        match self.provider.relaunch() {
            Ok(()) => {
                self.set_state(UpdateFlowState::Done);
                self.trigger.set(TriggerState::Idle);
                self.presenter.hide_progress();
                self.presenter.toast(
                    &format!("Updated to v{}", info.version),
                    ToastKind::Success,
                );
                CheckOutcome::Relaunched {
                    version: info.version,
                }
            }
            Err(e) => {
                error!(error = %e, "Relaunch failed");
                self.presenter.hide_progress();
                self.set_state(UpdateFlowState::Failed);
                self.reset();
                self.presenter.toast(
                    &format!("Update installed, please restart manually: {}", e),
                    ToastKind::Error,
                );
                CheckOutcome::Failed(e.to_string())
            }
        }
    }

    fn reset(&self) {
        self.set_state(UpdateFlowState::Idle);
        self.trigger.set(TriggerState::Idle);
    }
}

fn set_flow_state(state: &Mutex<UpdateFlowState>, next: UpdateFlowState) {
    let mut current = state.lock().unwrap_or_else(PoisonError::into_inner);
    if *current != next {
        debug!(from = ?*current, to = ?next, "Update flow transition");
        *current = next;
    }
}
