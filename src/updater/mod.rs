//! Update flow: provider abstraction, controller and presenter contract

mod config;
mod controller;
mod github;
mod presenter;
mod provider;
mod simulated;
mod trigger;

pub use config::UpdaterConfig;
pub use controller::UpdateController;
pub use github::GithubProvider;
pub use presenter::{ConfirmationDialog, Presenter, ProgressReport};
pub use provider::{ProgressCallback, ShutdownHook, UpdateProvider};
pub use simulated::SimulatedProvider;
pub use trigger::TriggerHandle;

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("{0}")]
    Check(String),
    #[error("{0}")]
    Install(String),
    #[error("relaunch failed: {0}")]
    Relaunch(String),
    #[error("invalid updater config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Release(#[from] self_update::errors::Error),
}

/// Pick the provider for this run.
///
/// Mock flags: MOCK_APP_UPDATE swaps in the simulated provider,
/// MOCK_CHECK_FAILURE additionally makes its check fail. `shutdown` runs
/// after a real relaunch has spawned the new process.
pub fn provider_from_env(
    config: &UpdaterConfig,
    staging_dir: PathBuf,
    shutdown: ShutdownHook,
) -> Arc<dyn UpdateProvider> {
    let mock_failure = std::env::var("MOCK_CHECK_FAILURE").is_ok();
    let mock_app = mock_failure || std::env::var("MOCK_APP_UPDATE").is_ok();

    if mock_app {
        info!(fail_check = mock_failure, "Using simulated update provider");
        Arc::new(SimulatedProvider::new(mock_failure))
    } else {
        info!(
            owner = %config.repo_owner,
            repo = %config.repo_name,
            "Using GitHub release provider"
        );
        Arc::new(GithubProvider::new(config.clone(), staging_dir, shutdown))
    }
}
