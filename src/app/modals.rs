//! Modal dialogs (update confirmation, install progress)

use super::presenter::{close_confirmation, pending_confirmation};
use super::App;
use crate::constants::APP_VERSION;
use crate::theme;
use crate::types::DialogAction;
use crate::ui::components::{progress_bar, release_notes};
use eframe::egui;
use tracing::debug;

impl App {
    pub(crate) fn render_update_confirmation(&mut self, ctx: &egui::Context) {
        // Never hold the overlay lock while drawing; the controller writes through it
        let Some(info) = pending_confirmation(&self.overlay) else {
            return;
        };
        let version = info.version;
        let notes = info.release_notes;

        // Built-in Modal with backdrop, escape-to-close, click-outside handling
        let modal_area = egui::Modal::default_area(egui::Id::new("app_update_modal"))
            .default_width(theme::MODAL_WIDTH + theme::SPACING_XL * 2.0);
        let modal = egui::Modal::new(egui::Id::new("app_update_modal"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());

        let mut action = None;
        let modal_response = modal.show(ctx, |ui| {
            ui.set_min_width(theme::MODAL_WIDTH);
            ui.set_max_width(theme::MODAL_WIDTH);

            ui.vertical_centered(|ui| {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::DOWNLOAD_SIMPLE)
                        .size(32.0)
                        .color(theme::ACCENT),
                );
                ui.label(egui::RichText::new("New version available").size(theme::FONT_TITLE).strong());
                ui.label(egui::RichText::new(format!("v{}", version)).size(22.0).strong().color(theme::ACCENT));
                ui.label(
                    egui::RichText::new(format!("Current: v{}", APP_VERSION))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            });

            ui.add_space(theme::SPACING_LG);
            ui.separator();
            ui.add_space(6.0);
            egui::ScrollArea::vertical()
                .max_height(220.0)
                .show(ui, |ui| release_notes(ui, &notes));

            ui.add_space(theme::SPACING_XL);
            ui.horizontal(|ui| {
                ui.set_min_height(28.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let update_btn = ui.add(theme::button_accent(format!(
                        "{}  Update now",
                        egui_phosphor::regular::DOWNLOAD_SIMPLE
                    )));
                    if update_btn.clicked() {
                        action = Some(DialogAction::Accept);
                    }
                    ui.add_space(theme::SPACING_MD);
                    let later_btn = ui.add(theme::button(format!(
                        "{}  Later",
                        egui_phosphor::regular::CLOCK
                    )));
                    if later_btn.clicked() {
                        action = Some(DialogAction::Decline);
                    }
                });
            });
        });

        if action.is_none() && modal_response.should_close() {
            action = Some(DialogAction::Backdrop);
        }

        if let Some(action) = action {
            debug!(?action, version = %version, "Update dialog closed");
            close_confirmation(&self.overlay, action);
        }
    }

    pub(crate) fn render_progress_surface(&mut self, ctx: &egui::Context) {
        let Some(surface) = self.overlay().progress.clone() else {
            return;
        };

        // Not dismissable: the install runs to completion or failure
        let modal_area = egui::Modal::default_area(egui::Id::new("update_progress_modal"))
            .default_width(theme::MODAL_WIDTH + theme::SPACING_XL * 2.0);
        egui::Modal::new(egui::Id::new("update_progress_modal"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_min_width(theme::MODAL_WIDTH);
                ui.set_max_width(theme::MODAL_WIDTH);
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(egui_phosphor::regular::DOWNLOAD_SIMPLE)
                            .size(theme::FONT_TITLE)
                            .color(theme::ACCENT),
                    );
                    ui.label(egui::RichText::new("Updating application").size(theme::FONT_HEADING).strong());
                });
                ui.add_space(theme::SPACING_LG);
                progress_bar(ui, surface.percent, &surface.text);
            });

        if surface.percent.is_none() {
            ctx.request_repaint();
        }
    }
}
