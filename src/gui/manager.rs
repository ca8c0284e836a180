//! Control panel implemented with egui/eframe

use std::time::Instant;

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{debug, info};

use super::components::preset_selector::{PresetAction, PresetSelector};
use super::components::reticle_settings;
use super::constants::*;
use super::overlay;
use crate::config::ConfigStore;
use crate::session::{LockState, OverlayState, Session};

struct CrosshairApp {
    session: Session,
    preset_selector: PresetSelector,
}

impl CrosshairApp {
    fn new(_cc: &CreationContext<'_>, store: ConfigStore) -> Self {
        info!(config_dir = %store.dir().display(), "Initializing control panel");

        let mut session = Session::start(store);
        session.start_overlay();

        Self {
            session,
            preset_selector: PresetSelector::new(),
        }
    }

    fn status_ui(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Overlay Status").strong());
            let (color, label) = match self.session.overlay_state() {
                OverlayState::Running => (STATUS_RUNNING, "\u{25CF}  Running"),
                OverlayState::Stopped => (STATUS_STOPPED, "\u{25CF}  Stopped"),
            };
            ui.colored_label(color, label);
            ui.label(format!(
                "Preset: {}  ({} saved)",
                self.session.active().name(),
                self.session.presets().len()
            ));
        });
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let run_label = if self.session.is_running() {
                "\u{23F9} Stop Overlay"
            } else {
                "\u{25B6} Start Overlay"
            };
            if ui.add_sized([BUTTON_WIDTH, 0.0], egui::Button::new(run_label)).clicked() {
                self.session.toggle_overlay();
            }

            let lock_label = match self.session.lock_state() {
                LockState::Locked => "\u{1F513} Unlock",
                LockState::Unlocked => "\u{1F512} Lock",
            };
            if ui.add_sized([BUTTON_WIDTH, 0.0], egui::Button::new(lock_label)).clicked() {
                self.session.toggle_lock();
            }
        });

        ui.horizontal(|ui| {
            let reset = egui::Button::new("\u{2316} Reset Position");
            if ui
                .add_enabled_ui(self.session.can_reset(), |ui| ui.add_sized([BUTTON_WIDTH, 0.0], reset))
                .inner
                .clicked()
            {
                self.session.reset_position();
            }

            if ui.add_sized([BUTTON_WIDTH, 0.0], egui::Button::new("\u{2715} Exit")).clicked() {
                info!("Exit requested from control panel");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }
}

impl eframe::App for CrosshairApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Transparent so the overlay viewport shows only the reticle
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(PADDING);
            ui.heading("Crosshair Overlay");
            ui.add_space(SECTION_SPACING);

            self.status_ui(ui);
            ui.add_space(SECTION_SPACING);

            self.controls_ui(ui, ctx);
            ui.add_space(SECTION_SPACING);
            ui.separator();
            ui.add_space(SECTION_SPACING);

            let action = self.preset_selector.ui(ui, &mut self.session);
            if action != PresetAction::None {
                debug!(?action, "Preset action handled");
            }
            ui.add_space(SECTION_SPACING);

            if reticle_settings::ui(ui, &mut self.session) {
                debug!(settings = ?self.session.settings(), "Reticle settings applied");
            }
            ui.add_space(SECTION_SPACING);

            let now = Instant::now();
            if let Some(text) = self.session.visible_feedback(now) {
                ui.colored_label(FEEDBACK_COLOR, text);
            }
            if let Some(remaining) = self.session.feedback_remaining(now) {
                ctx.request_repaint_after(remaining);
            }

            ui.add_space(SECTION_SPACING);
            ui.label(
                egui::RichText::new(format!("Config: {}", self.session.config_dir().display()))
                    .small()
                    .weak(),
            );
        });

        overlay::show(ctx, &mut self.session);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.session.on_exit();
        info!("Control panel exiting");
    }
}

pub fn run_gui(store: ConfigStore) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Crosshair Overlay"),
        ..Default::default()
    };

    eframe::run_native(
        "Crosshair Overlay",
        options,
        Box::new(|cc| Ok(Box::new(CrosshairApp::new(cc, store)))),
    )
    .map_err(|err| anyhow!("Failed to launch control panel: {err}"))
}
