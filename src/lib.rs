//! Update Flow library crate
//!
//! The check-for-update flow behind the desktop binary, plus the
//! configuration checks used by `verify-update-config`.

pub mod app;
pub mod constants;
pub mod diagnostics;
pub mod settings;
pub mod theme;
pub mod types;
pub mod ui;
pub mod updater;
pub mod utils;
