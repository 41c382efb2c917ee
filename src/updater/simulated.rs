//! Simulated provider for exercising the flow without a release server

use super::{ProgressCallback, UpdateError, UpdateProvider};
use crate::constants::{MOCK_TICK, MOCK_VERSION};
use crate::types::{ProgressEvent, UpdateInfo};
use futures::future::BoxFuture;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

const MOCK_CHECK_LATENCY: Duration = Duration::from_millis(600);

const MOCK_RELEASE_NOTES: &str = "## What's New\n\n\
    - Manual check for updates from the toolbar\n\
    - Refined dialog layout\n\n\
    ## Bug Fixes\n\n\
    - Fixed progress text stalling on unknown download sizes";

pub struct SimulatedProvider {
    fail_check: bool,
}

impl SimulatedProvider {
    pub fn new(fail_check: bool) -> Self {
        Self { fail_check }
    }
}

/// xorshift step; good enough to make the fake bar look uneven
fn next_step(seed: &mut u64) -> f32 {
    *seed ^= *seed << 13;
    *seed ^= *seed >> 7;
    *seed ^= *seed << 17;
    (*seed % 1500) as f32 / 100.0
}

impl UpdateProvider for SimulatedProvider {
    fn check(&self) -> BoxFuture<'_, Result<Option<UpdateInfo>, UpdateError>> {
        Box::pin(async move {
            tokio::time::sleep(MOCK_CHECK_LATENCY).await;
            if self.fail_check {
                debug!("Mock check: simulating network failure");
                return Err(UpdateError::Check("network error".into()));
            }
            debug!(version = MOCK_VERSION, "Mock check: simulating available update");
            Ok(Some(UpdateInfo::available(MOCK_VERSION, MOCK_RELEASE_NOTES)))
        })
    }

    fn download_and_install(
        &self,
        mut on_event: ProgressCallback,
    ) -> BoxFuture<'_, Result<(), UpdateError>> {
        Box::pin(async move {
            let mut seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x2545_f491_4f6c_dd1d)
                | 1;
            let mut progress = 0.0_f32;

            on_event(ProgressEvent::Started);
            let mut ticker = tokio::time::interval(MOCK_TICK);
            // First tick completes immediately
            ticker.tick().await;
            while progress < 100.0 {
                ticker.tick().await;
                progress = (progress + next_step(&mut seed)).min(100.0);
                on_event(ProgressEvent::Progress(Some(progress)));
            }
            on_event(ProgressEvent::Finished);
            Ok(())
        })
    }

    fn relaunch(&self) -> Result<(), UpdateError> {
        info!("Mock relaunch: keeping current process");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test(start_paused = true)]
    async fn test_progress_is_monotonic_and_ends_finished() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let provider = SimulatedProvider::new(false);

        provider
            .download_and_install(Box::new(move |e| sink.lock().unwrap().push(e)))
            .await
            .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.first(), Some(&ProgressEvent::Started));
        assert_eq!(events.last(), Some(&ProgressEvent::Finished));
        let percents: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Progress(Some(p)) => Some(*p),
                _ => None,
            })
            .collect();
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(percents.last().copied(), Some(100.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_check() {
        let err = SimulatedProvider::new(true).check().await.unwrap_err();
        assert_eq!(err.to_string(), "network error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_reports_mock_version() {
        let info = SimulatedProvider::new(false).check().await.unwrap().unwrap();
        assert!(info.available);
        assert_eq!(info.version, MOCK_VERSION);
    }
}
