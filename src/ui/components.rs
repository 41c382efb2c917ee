//! Reusable UI components
//!
//! This module contains standalone UI components used by the update
//! modals and the toolbar.

use crate::theme;
use crate::types::TriggerState;
use eframe::egui;

/// Fallback shown when a release has no notes
pub const DEFAULT_RELEASE_NOTES: &str = "Bug fixes and performance improvements";

/// Check-for-update toolbar button. Disabled while a check is running.
pub fn trigger_button(ui: &mut egui::Ui, state: TriggerState) -> egui::Response {
    let style = theme::trigger_style(state.class());
    let button = egui::Button::new(
        egui::RichText::new(theme::trigger_icon(state))
            .size(theme::FONT_HEADING)
            .color(style.icon_color),
    )
    .fill(theme::BG_SURFACE)
    .corner_radius(theme::RADIUS_DEFAULT)
    .min_size(egui::vec2(theme::TRIGGER_SIZE, theme::TRIGGER_SIZE));

    let response = ui
        .add_enabled(state != TriggerState::Checking, button)
        .on_hover_text(state.title())
        .on_disabled_hover_text(state.title());

    // Badge dot for a pending update
    if style.badge {
        let dot = response.rect.right_top() + egui::vec2(-5.0, 5.0);
        ui.painter().circle_filled(dot, 3.5, theme::TOAST_ERROR);
    }
    response
}

/// Render release notes with light markdown: headings and bullet lists
pub fn release_notes(ui: &mut egui::Ui, notes: &str) {
    let notes = if notes.trim().is_empty() {
        DEFAULT_RELEASE_NOTES
    } else {
        notes
    };
    for line in notes.lines() {
        let line = line.trim_end();
        if let Some(heading) = line.strip_prefix("## ") {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(heading).strong().size(14.0));
        } else if let Some(heading) = line.strip_prefix("# ") {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(heading).strong().size(theme::FONT_HEADING));
        } else if let Some(item) = line.trim_start().strip_prefix("- ") {
            ui.label(format!("  •  {}", item));
        } else if line.is_empty() {
            ui.add_space(2.0);
        } else {
            ui.label(line);
        }
    }
}

/// Progress bar with status text; `None` shows a spinner instead of a bar
pub fn progress_bar(ui: &mut egui::Ui, percent: Option<f32>, text: &str) {
    match percent {
        Some(pct) => {
            ui.add(
                egui::ProgressBar::new(pct / 100.0)
                    .fill(theme::ACCENT)
                    .desired_height(6.0),
            );
            ui.add_space(theme::SPACING_SM);
            ui.label(egui::RichText::new(text).color(theme::TEXT_MUTED));
        }
        None => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new(text).color(theme::TEXT_MUTED));
            });
        }
    }
}
