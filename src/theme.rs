//! Centralized theme constants for Update Flow
//! All colors, sizes, and styling should reference these constants

use crate::types::{ToastKind, TriggerState};
use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x09, 0x09, 0x0b); // zinc-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // zinc-900
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800
pub const BG_MODAL: Color32 = Color32::from_rgb(0x12, 0x12, 0x14);

// =============================================================================
// COLORS - Accent (Teal)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400
pub const ACCENT_TEXT: Color32 = Color32::from_rgb(0x04, 0x2f, 0x2e); // text on accent fill

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7); // zinc-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa); // zinc-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800

// =============================================================================
// COLORS - Toasts
// =============================================================================
pub const TOAST_SUCCESS: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81); // emerald-500
pub const TOAST_ERROR: Color32 = Color32::from_rgb(0xef, 0x44, 0x44); // red-500
pub const TOAST_INFO: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6); // blue-500

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400

// =============================================================================
// SIZES
// =============================================================================
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_SMALL: f32 = 12.0;
pub const MODAL_WIDTH: f32 = 380.0;
pub const TOAST_MAX_WIDTH: f32 = 300.0;
pub const TRIGGER_SIZE: f32 = 32.0;

// =============================================================================
// BORDER RADIUS / STROKE / SPACING
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 8.0;
pub const STROKE_DEFAULT: f32 = 1.0;
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

pub fn toast_color(kind: ToastKind) -> Color32 {
    match kind {
        ToastKind::Success => TOAST_SUCCESS,
        ToastKind::Error => TOAST_ERROR,
        ToastKind::Info => TOAST_INFO,
    }
}

pub fn trigger_icon(state: TriggerState) -> &'static str {
    match state {
        TriggerState::Idle => egui_phosphor::regular::ARROWS_CLOCKWISE,
        TriggerState::Checking => egui_phosphor::regular::CIRCLE_NOTCH,
        TriggerState::HasUpdate => egui_phosphor::regular::DOWNLOAD_SIMPLE,
    }
}

/// Look of the trigger button for a given state class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerStyle {
    pub icon_color: Color32,
    pub badge: bool,
}

pub fn trigger_style(class: &str) -> TriggerStyle {
    match class {
        "has-update" => TriggerStyle {
            icon_color: ACCENT,
            badge: true,
        },
        "checking" => TriggerStyle {
            icon_color: TEXT_DIM,
            badge: false,
        },
        _ => TriggerStyle {
            icon_color: TEXT_SECONDARY,
            badge: false,
        },
    }
}

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: Color32::from_rgb(0x1a, 0x1a, 0x1e),
        extreme_bg_color: BG_BASE,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_stroke: egui::Stroke::new(STROKE_DEFAULT, Color32::from_rgb(0x2a, 0x2a, 0x2e)),
        window_corner_radius: egui::CornerRadius::same(8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgba_unmultiplied(0x18, 0x18, 0x1b, 150))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
}

pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_MODAL)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(SPACING_XL)
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Default gray button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BTN_DEFAULT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Accent teal button (for primary actions like Update)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(ACCENT_TEXT))
        .fill(BTN_ACCENT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Scale a color's alpha, used for fading toasts
pub fn with_alpha(c: Color32, alpha: f32) -> Color32 {
    let a = (c.a() as f32 * alpha.clamp(0.0, 1.0)) as u8;
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_style_follows_state_class() {
        let has_update = trigger_style(TriggerState::HasUpdate.class());
        assert!(has_update.badge);
        assert_eq!(has_update.icon_color, ACCENT);

        let checking = trigger_style(TriggerState::Checking.class());
        assert!(!checking.badge);
        assert_eq!(checking.icon_color, TEXT_DIM);

        assert_eq!(trigger_style(TriggerState::Idle.class()).icon_color, TEXT_SECONDARY);
    }
}
