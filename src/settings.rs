//! User settings stored as settings.json in the app data directory

use crate::constants::{RELAUNCH_SETTLE_DELAY, STARTUP_CHECK_DELAY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Updates
    pub auto_check: bool,
    pub startup_delay_ms: u64,
    pub settle_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            auto_check: true,
            startup_delay_ms: STARTUP_CHECK_DELAY.as_millis() as u64,
            settle_delay_ms: RELAUNCH_SETTLE_DELAY.as_millis() as u64,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            auto_check: false,
            window_w: Some(800.0),
            ..Default::default()
        };
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert!(!loaded.auto_check);
        assert_eq!(loaded.window_w, Some(800.0));
        assert_eq!(loaded.settle_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"startup_delay_ms": 250}"#).unwrap();

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.startup_delay(), Duration::from_millis(250));
        assert!(loaded.auto_check);
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.startup_delay_ms, 5000);
    }
}
