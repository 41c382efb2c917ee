//! egui-backed presenter
//!
//! The controller runs on the tokio runtime; it publishes modal, progress and
//! toast state here and the UI thread renders whatever is current each frame.

use crate::types::{Decision, DialogAction, ToastKind, UpdateInfo};
use crate::ui::toasts::ToastQueue;
use crate::updater::{ConfirmationDialog, Presenter};
use eframe::egui;
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::debug;

/// Progress modal contents
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSurface {
    pub percent: Option<f32>,
    pub text: String,
}

/// Everything the update flow currently wants on screen
#[derive(Debug, Default)]
pub struct OverlayState {
    pub confirmation: Option<ConfirmationDialog>,
    pub progress: Option<ProgressSurface>,
    pub toasts: ToastQueue,
}

/// Copy of the open confirmation, taken without holding the lock while drawing
pub(crate) fn pending_confirmation(overlay: &Mutex<OverlayState>) -> Option<UpdateInfo> {
    let state = overlay.lock().unwrap_or_else(PoisonError::into_inner);
    state.confirmation.as_ref().map(|dialog| dialog.info().clone())
}

/// Resolve and remove the open confirmation. Returns false if none was open.
pub(crate) fn close_confirmation(overlay: &Mutex<OverlayState>, action: DialogAction) -> bool {
    let mut state = overlay.lock().unwrap_or_else(PoisonError::into_inner);
    match state.confirmation.take() {
        Some(mut dialog) => dialog.resolve(action),
        None => false,
    }
}

#[derive(Clone)]
pub struct EguiPresenter {
    overlay: Arc<Mutex<OverlayState>>,
    ctx: egui::Context,
}

impl EguiPresenter {
    pub fn new(overlay: Arc<Mutex<OverlayState>>, ctx: egui::Context) -> Self {
        Self { overlay, ctx }
    }

    fn overlay(&self) -> MutexGuard<'_, OverlayState> {
        self.overlay.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Presenter for EguiPresenter {
    fn confirm_update(&self, info: &UpdateInfo) -> BoxFuture<'static, Decision> {
        let (dialog, decision) = ConfirmationDialog::open(info.clone());
        // A stale dialog would otherwise never resolve; dropping it declines
        if self.overlay().confirmation.replace(dialog).is_some() {
            debug!("Replaced an unresolved update dialog");
        }
        self.ctx.request_repaint();
        decision
    }

    fn show_progress(&self) {
        self.overlay().progress = Some(ProgressSurface {
            percent: Some(0.0),
            text: String::new(),
        });
        self.ctx.request_repaint();
    }

    fn set_progress(&self, percent: Option<f32>, text: &str) {
        if let Some(surface) = self.overlay().progress.as_mut() {
            surface.percent = percent;
            surface.text = text.to_string();
        }
        self.ctx.request_repaint();
    }

    fn hide_progress(&self) {
        self.overlay().progress = None;
        self.ctx.request_repaint();
    }

    fn toast(&self, message: &str, kind: ToastKind) {
        self.overlay().toasts.push(message, kind, Instant::now());
        self.ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter() -> (EguiPresenter, Arc<Mutex<OverlayState>>) {
        let overlay = Arc::new(Mutex::new(OverlayState::default()));
        (EguiPresenter::new(overlay.clone(), egui::Context::default()), overlay)
    }

    #[tokio::test]
    async fn test_confirmation_roundtrip_through_overlay() {
        let (presenter, overlay) = presenter();
        let decision = presenter.confirm_update(&UpdateInfo::available("0.2.0", "fixes"));

        {
            let mut state = overlay.lock().unwrap();
            let dialog = state.confirmation.as_mut().unwrap();
            assert_eq!(dialog.info().version, "0.2.0");
            assert!(dialog.resolve(DialogAction::Accept));
            state.confirmation = None;
        }
        assert_eq!(decision.await, Decision::Accept);
    }

    #[tokio::test]
    async fn test_snapshot_leaves_overlay_unlocked_for_presenter() {
        let (presenter, overlay) = presenter();
        let decision = presenter.confirm_update(&UpdateInfo::available("0.2.0", "fixes"));

        let info = pending_confirmation(&overlay).unwrap();
        assert_eq!(info.release_notes, "fixes");
        // Controller-side calls must not wait on the dialog being drawn
        assert!(overlay.try_lock().is_ok());
        presenter.toast("Downloading in the background", ToastKind::Info);

        assert!(close_confirmation(&overlay, DialogAction::Backdrop));
        assert!(!close_confirmation(&overlay, DialogAction::Accept));
        assert!(pending_confirmation(&overlay).is_none());
        assert_eq!(decision.await, Decision::Decline);
        assert_eq!(overlay.lock().unwrap().toasts.len(), 1);
    }

    #[tokio::test]
    async fn test_replacing_dialog_declines_previous() {
        let (presenter, _overlay) = presenter();
        let first = presenter.confirm_update(&UpdateInfo::available("0.2.0", ""));
        let _second = presenter.confirm_update(&UpdateInfo::available("0.3.0", ""));
        assert_eq!(first.await, Decision::Decline);
    }

    #[test]
    fn test_progress_updates_require_visible_surface() {
        let (presenter, overlay) = presenter();
        presenter.set_progress(Some(10.0), "ignored");
        assert!(overlay.lock().unwrap().progress.is_none());

        presenter.show_progress();
        presenter.set_progress(None, "Downloading update...");
        assert_eq!(
            overlay.lock().unwrap().progress,
            Some(ProgressSurface {
                percent: None,
                text: "Downloading update...".into()
            })
        );

        presenter.hide_progress();
        assert!(overlay.lock().unwrap().progress.is_none());
    }

    #[test]
    fn test_toasts_are_queued() {
        let (presenter, overlay) = presenter();
        presenter.toast("Update check failed: network error", ToastKind::Error);
        let state = overlay.lock().unwrap();
        let toast = state.toasts.iter().next().unwrap();
        assert!(toast.message.contains("network error"));
        assert_eq!(toast.kind, ToastKind::Error);
    }
}
