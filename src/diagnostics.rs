//! Update configuration checks behind `verify-update-config`
//!
//! Every check runs regardless of earlier failures; the report collects
//! them all and reduces to a single pass/fail.

use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Files that must exist relative to the project root
pub const REQUIRED_FILES: &[&str] = &[
    ".github/workflows/release.yml",
    "Cargo.toml",
    "updater.json",
    "src/updater/mod.rs",
];

pub const APP_CONFIG_FILE: &str = "updater.json";
pub const MANIFEST_FILE: &str = "Cargo.toml";

/// Fields required inside the `updater` section of the app config
pub const REQUIRED_CONFIG_FIELDS: &[&str] = &["repo_owner", "repo_name"];

/// Crates the manifest must reference for updates to work
pub const REQUIRED_CRATES: &[&str] = &["self_update", "self-replace"];

#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("{0} - missing")]
    ConfigFileMissing(String),
    #[error("{file} - `{field}` not configured")]
    ConfigFieldMissing { file: String, field: String },
    #[error("{file} - could not be read: {reason}")]
    ConfigUnreadable { file: String, reason: String },
}

#[derive(Debug)]
pub enum Line {
    Pass(String),
    Fail(DiagnosticError),
    Info(String),
}

impl Line {
    pub fn render(&self) -> String {
        match self {
            Line::Pass(msg) => format!("✅ {}", msg),
            Line::Fail(err) => format!("❌ {}", err),
            Line::Info(msg) => format!("   - {}", msg),
        }
    }
}

#[derive(Debug)]
pub struct Section {
    pub title: &'static str,
    pub lines: Vec<Line>,
}

#[derive(Debug, Default)]
pub struct Report {
    pub sections: Vec<Section>,
}

impl Report {
    pub fn failures(&self) -> impl Iterator<Item = &DiagnosticError> {
        self.sections.iter().flat_map(|s| &s.lines).filter_map(|line| match line {
            Line::Fail(err) => Some(err),
            _ => None,
        })
    }

    pub fn passed(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }

    /// Printable output, one entry per line
    pub fn render(&self) -> Vec<String> {
        let mut out = Vec::new();
        for section in &self.sections {
            out.push(String::new());
            out.push(format!("{}:", section.title));
            out.extend(section.lines.iter().map(Line::render));
        }
        out
    }
}

/// Run every check against the project at `root`
pub fn verify(root: &Path) -> Report {
    Report {
        sections: vec![
            check_required_files(root),
            check_app_config(root),
            check_manifest(root),
        ],
    }
}

fn check_required_files(root: &Path) -> Section {
    let lines = REQUIRED_FILES
        .iter()
        .map(|file| {
            if root.join(file).exists() {
                Line::Pass(format!("{} - present", file))
            } else {
                Line::Fail(DiagnosticError::ConfigFileMissing(file.to_string()))
            }
        })
        .collect();
    Section {
        title: "Required files",
        lines,
    }
}

fn read_config(root: &Path, file: &str) -> Result<String, DiagnosticError> {
    let path = root.join(file);
    if !path.exists() {
        return Err(DiagnosticError::ConfigFileMissing(file.to_string()));
    }
    std::fs::read_to_string(&path).map_err(|e| DiagnosticError::ConfigUnreadable {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

fn check_app_config(root: &Path) -> Section {
    let mut lines = Vec::new();
    let parsed = read_config(root, APP_CONFIG_FILE).and_then(|text| {
        serde_json::from_str::<Value>(&text).map_err(|e| DiagnosticError::ConfigUnreadable {
            file: APP_CONFIG_FILE.to_string(),
            reason: e.to_string(),
        })
    });

    match parsed {
        Err(err) => lines.push(Line::Fail(err)),
        Ok(json) => match json.get("updater").filter(|u| u.is_object()) {
            None => lines.push(Line::Fail(DiagnosticError::ConfigFieldMissing {
                file: APP_CONFIG_FILE.to_string(),
                field: "updater".to_string(),
            })),
            Some(updater) => {
                lines.push(Line::Pass(format!("{} - updater section found", APP_CONFIG_FILE)));
                let active = updater.get("active").and_then(Value::as_bool).unwrap_or(true);
                lines.push(Line::Info(format!("active: {}", active)));

                for field in REQUIRED_CONFIG_FIELDS {
                    match updater.get(*field).and_then(Value::as_str).filter(|v| !v.is_empty()) {
                        Some(value) => lines.push(Line::Pass(format!("{} = {}", field, value))),
                        None => lines.push(Line::Fail(DiagnosticError::ConfigFieldMissing {
                            file: APP_CONFIG_FILE.to_string(),
                            field: field.to_string(),
                        })),
                    }
                }

                let bin_name = updater
                    .get("bin_name")
                    .and_then(Value::as_str)
                    .unwrap_or(env!("CARGO_PKG_NAME"));
                lines.push(Line::Info(format!("binary: {}", bin_name)));
            }
        },
    }

    Section {
        title: "Updater config",
        lines,
    }
}

fn check_manifest(root: &Path) -> Section {
    let lines = match read_config(root, MANIFEST_FILE) {
        Err(err) => vec![Line::Fail(err)],
        Ok(manifest) => REQUIRED_CRATES
            .iter()
            .map(|krate| {
                if manifest.contains(krate) {
                    Line::Pass(format!("dependency {} - configured", krate))
                } else {
                    Line::Fail(DiagnosticError::ConfigFieldMissing {
                        file: MANIFEST_FILE.to_string(),
                        field: krate.to_string(),
                    })
                }
            })
            .collect(),
    };
    Section {
        title: "Manifest dependencies",
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const GOOD_CONFIG: &str =
        r#"{"updater": {"active": true, "repo_owner": "me", "repo_name": "app", "bin_name": "app"}}"#;
    const GOOD_MANIFEST: &str = "[dependencies]\nself_update = \"0.41\"\nself-replace = \"1\"\n";

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in REQUIRED_FILES {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }
        fs::write(dir.path().join(APP_CONFIG_FILE), GOOD_CONFIG).unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), GOOD_MANIFEST).unwrap();
        dir
    }

    #[test]
    fn test_complete_project_passes() {
        let dir = project();
        let report = verify(dir.path());
        assert!(report.passed());
        assert_eq!(report.exit_code(), 0);
        assert!(report.render().iter().any(|l| l.contains("repo_owner = me")));
    }

    #[test]
    fn test_missing_file_fails_and_names_it() {
        let dir = project();
        fs::remove_file(dir.path().join(".github/workflows/release.yml")).unwrap();

        let report = verify(dir.path());
        assert_eq!(report.exit_code(), 1);
        assert!(report
            .render()
            .iter()
            .any(|l| l.starts_with("❌") && l.contains(".github/workflows/release.yml")));
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_missing_updater_section() {
        let dir = project();
        fs::write(dir.path().join(APP_CONFIG_FILE), r#"{"name": "app"}"#).unwrap();

        let report = verify(dir.path());
        assert!(!report.passed());
        assert!(report.failures().any(|e| matches!(
            e,
            DiagnosticError::ConfigFieldMissing { field, .. } if field == "updater"
        )));
    }

    #[test]
    fn test_missing_field_and_crate_are_each_reported() {
        let dir = project();
        fs::write(dir.path().join(APP_CONFIG_FILE), r#"{"updater": {"repo_owner": "me"}}"#).unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "[dependencies]\nself_update = \"0.41\"\n").unwrap();

        let report = verify(dir.path());
        let failures: Vec<String> = report.failures().map(|e| e.to_string()).collect();
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().any(|f| f.contains("repo_name")));
        assert!(failures.iter().any(|f| f.contains("self-replace")));
    }

    #[test]
    fn test_unparseable_config_is_a_failure() {
        let dir = project();
        fs::write(dir.path().join(APP_CONFIG_FILE), "{ nope").unwrap();

        let report = verify(dir.path());
        assert!(report
            .failures()
            .any(|e| matches!(e, DiagnosticError::ConfigUnreadable { .. })));
    }

    #[test]
    fn test_empty_directory_reports_every_missing_file() {
        let dir = TempDir::new().unwrap();
        let report = verify(dir.path());
        let missing = report
            .failures()
            .filter(|e| matches!(e, DiagnosticError::ConfigFileMissing(_)))
            .count();
        // Every required file plus the two config reads
        assert_eq!(missing, REQUIRED_FILES.len() + 2);
    }
}
