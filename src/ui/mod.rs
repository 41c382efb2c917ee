//! UI module - contains UI rendering components
//!
//! Widgets and overlays that do not depend on application state.

pub mod components;
pub mod toasts;
