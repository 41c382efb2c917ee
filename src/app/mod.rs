//! App module - contains the main application state and logic

mod modals;
mod presenter;

pub use presenter::{EguiPresenter, OverlayState, ProgressSurface};

use crate::constants::*;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use crate::ui::components::trigger_button;
use crate::ui::toasts::render_toasts;
use crate::updater::{
    self, ShutdownHook, TriggerHandle, UpdateController, UpdateError, UpdaterConfig,
};
use crate::utils::get_staging_dir;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) controller: UpdateController,
    pub(crate) trigger: TriggerHandle,
    pub(crate) overlay: Arc<Mutex<OverlayState>>,
    pub(crate) config: UpdaterConfig,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) auto_check_scheduled: bool,
    pub(crate) last_outcome: Arc<Mutex<Option<CheckOutcome>>>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, UpdateError> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        theme::apply_visuals(&cc.egui_ctx);

        let config = UpdaterConfig::embedded()?;
        let runtime = tokio::runtime::Runtime::new()?;

        let overlay = Arc::new(Mutex::new(OverlayState::default()));
        let trigger = TriggerHandle::new();
        let presenter = Arc::new(EguiPresenter::new(overlay.clone(), cc.egui_ctx.clone()));
        // Closing the viewport runs on_exit and lets main drop the log guard
        let close_ctx = cc.egui_ctx.clone();
        let shutdown: ShutdownHook = Arc::new(move || {
            info!("Closing window for relaunch");
            close_ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        });
        let provider = updater::provider_from_env(&config, get_staging_dir(), shutdown);
        let controller = UpdateController::new(provider, presenter, trigger.clone())
            .with_delays(settings.startup_delay(), settings.settle_delay());

        Ok(Self {
            runtime,
            controller,
            trigger,
            overlay,
            config,
            needs_center: settings.window_x.is_none() || settings.window_y.is_none(),
            settings,
            data_dir,
            auto_check_scheduled: false,
            last_outcome: Arc::new(Mutex::new(None)),
            window_pos: None,
            window_size: None,
        })
    }

    pub(crate) fn overlay(&self) -> MutexGuard<'_, OverlayState> {
        self.overlay.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    /// Manual check from the toolbar; always reports the result
    fn start_manual_check(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let last_outcome = self.last_outcome.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = controller.check_for_updates(true).await;
            *last_outcome.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
            ctx.request_repaint();
        });
    }

    fn schedule_auto_check(&mut self, ctx: &egui::Context) {
        if self.auto_check_scheduled {
            return;
        }
        self.auto_check_scheduled = true;

        if !self.settings.auto_check || !self.config.active {
            info!(
                auto_check = self.settings.auto_check,
                active = self.config.active,
                "Startup update check disabled"
            );
            return;
        }

        let _guard = self.runtime.enter();
        let handle = self.controller.auto_check_for_updates();
        let last_outcome = self.last_outcome.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            match handle.await {
                Ok(outcome) => {
                    *last_outcome.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
                    ctx.request_repaint();
                }
                Err(e) => warn!(error = %e, "Startup update check task failed"),
            }
        });
    }

    fn status_text(&self) -> String {
        match self.controller.state() {
            UpdateFlowState::Checking => "Checking for updates...".to_string(),
            UpdateFlowState::UpdateAvailable => "A new version is available".to_string(),
            UpdateFlowState::Downloading => MSG_DOWNLOADING.to_string(),
            UpdateFlowState::Installing => MSG_INSTALLING.to_string(),
            UpdateFlowState::Done => "Update installed".to_string(),
            UpdateFlowState::Idle | UpdateFlowState::Failed => {
                let last = self.last_outcome.lock().unwrap_or_else(PoisonError::into_inner);
                match last.as_ref() {
                    Some(CheckOutcome::UpToDate) => "You're on the latest version".to_string(),
                    Some(CheckOutcome::Declined) => "Update postponed".to_string(),
                    Some(CheckOutcome::Failed(e)) => format!("Last check failed: {}", e),
                    Some(CheckOutcome::Relaunched { version }) => format!("Updated to v{}", version),
                    Some(CheckOutcome::AlreadyRunning) | None => "Not checked yet".to_string(),
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        self.schedule_auto_check(ctx);

        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(APP_NAME).size(theme::FONT_HEADING).strong());
                    ui.label(
                        egui::RichText::new(format!("v{}", APP_VERSION))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if trigger_button(ui, self.trigger.get()).clicked() {
                            self.start_manual_check(ctx);
                        }
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(theme::SPACING_XL);
            theme::card_frame().show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(egui::RichText::new("Updates").size(theme::FONT_HEADING).strong());
                ui.add_space(theme::SPACING_SM);
                ui.label(egui::RichText::new(self.status_text()).color(theme::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!(
                        "Releases from {}/{}",
                        self.config.repo_owner, self.config.repo_name
                    ))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
                );
                ui.add_space(theme::SPACING_MD);
                let mut auto_check = self.settings.auto_check;
                if ui.checkbox(&mut auto_check, "Check for updates on startup").changed() {
                    self.settings.auto_check = auto_check;
                    self.save_settings();
                }
            });
        });

        self.render_update_confirmation(ctx);
        self.render_progress_surface(ctx);

        let toasts_visible = {
            let mut overlay = self.overlay();
            render_toasts(ctx, &mut overlay.toasts)
        };
        if toasts_visible {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
        if self.trigger.get() == TriggerState::Checking {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
