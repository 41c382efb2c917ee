//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

/// Per-user application data directory
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Where downloaded release assets are staged before install
pub fn get_staging_dir() -> PathBuf {
    get_data_dir().join("updates")
}

/// Returns true if `new` is a semver bump over `current`. A leading `v` is ignored.
///
/// Prereleases order below their release, so `0.1.0-rc.2` is not newer than `0.1.0`.
pub fn version_newer(new: &str, current: &str) -> Result<bool, self_update::errors::Error> {
    self_update::version::bump_is_greater(
        current.trim_start_matches('v'),
        new.trim_start_matches('v'),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_newer() {
        assert!(version_newer("0.2.0", "0.1.0").unwrap());
        assert!(version_newer("v1.0.0", "0.9.9").unwrap());
        assert!(version_newer("0.1.10", "0.1.9").unwrap());
        assert!(!version_newer("0.1.0", "0.1.0").unwrap());
        assert!(!version_newer("v0.1.0", "0.2.0").unwrap());
    }

    #[test]
    fn test_prerelease_is_not_newer_than_release() {
        assert!(!version_newer("0.1.0-rc.2", "0.1.0").unwrap());
        assert!(version_newer("0.1.0", "0.1.0-rc.2").unwrap());
        assert!(version_newer("0.2.0-rc.1", "0.1.0").unwrap());
    }

    #[test]
    fn test_unparseable_version_is_an_error() {
        assert!(version_newer("1.1", "1.0.5").is_err());
        assert!(version_newer("latest", "0.1.0").is_err());
    }

    #[test]
    fn test_staging_dir_is_under_data_dir() {
        assert!(get_staging_dir().starts_with(get_data_dir()));
    }
}
