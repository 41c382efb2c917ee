//! Application constants and configuration

use std::time::Duration;

pub const APP_NAME: &str = "Update Flow";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Delay between launch and the one-shot background update check
pub const STARTUP_CHECK_DELAY: Duration = Duration::from_secs(5);
/// Pause after install so the UI can show completion before relaunch
pub const RELAUNCH_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Toast timings
pub const TOAST_VISIBLE: Duration = Duration::from_millis(3000);
pub const TOAST_FADE: Duration = Duration::from_millis(300);

/// Simulated provider (MOCK_APP_UPDATE)
pub const MOCK_VERSION: &str = "0.2.0";
pub const MOCK_TICK: Duration = Duration::from_millis(200);

/// Progress surface messages
pub const MSG_PREPARING: &str = "Preparing download...";
pub const MSG_DOWNLOADING: &str = "Downloading update...";
pub const MSG_FINISHED: &str = "Update downloaded, restarting...";
pub const MSG_INSTALLING: &str = "Installing update...";
