//! Release source, read from updater.json at the repository root

use super::UpdateError;
use serde::Deserialize;

const EMBEDDED_CONFIG: &str = include_str!("../../updater.json");

#[derive(Debug, Clone, Deserialize)]
pub struct UpdaterConfig {
    /// When false the startup check is skipped; manual checks still run
    #[serde(default = "default_active")]
    pub active: bool,
    pub repo_owner: String,
    pub repo_name: String,
    #[serde(default = "default_bin_name")]
    pub bin_name: String,
}

#[derive(Deserialize)]
struct ConfigFile {
    updater: UpdaterConfig,
}

fn default_active() -> bool {
    true
}

fn default_bin_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

impl UpdaterConfig {
    /// The config compiled into the binary
    pub fn embedded() -> Result<Self, UpdateError> {
        Self::from_json(EMBEDDED_CONFIG)
    }

    pub fn from_json(json: &str) -> Result<Self, UpdateError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Ok(file.updater)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = UpdaterConfig::embedded().unwrap();
        assert!(!config.repo_owner.is_empty());
        assert!(!config.repo_name.is_empty());
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config =
            UpdaterConfig::from_json(r#"{"updater": {"repo_owner": "a", "repo_name": "b"}}"#).unwrap();
        assert!(config.active);
        assert_eq!(config.bin_name, "update-flow");
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let err = UpdaterConfig::from_json(r#"{"repo_owner": "a"}"#).unwrap_err();
        assert!(matches!(err, UpdateError::Config(_)));
    }
}
