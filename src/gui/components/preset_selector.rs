//! Preset selector: create, pick, save and delete named presets

use eframe::egui;
use tracing::debug;
use crate::gui::constants::*;
use crate::session::Session;

pub struct PresetSelector {
    new_preset_name: String,
    show_delete_confirm: bool,
}

impl PresetSelector {
    pub fn new() -> Self {
        Self {
            new_preset_name: String::new(),
            show_delete_confirm: false,
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, session: &mut Session) -> PresetAction {
        let mut action = PresetAction::None;

        ui.group(|ui| {
            ui.label(egui::RichText::new("Presets").strong());
            ui.add_space(ITEM_SPACING);

            // New preset entry
            ui.horizontal(|ui| {
                ui.label("New:");
                let entry = egui::TextEdit::singleline(&mut self.new_preset_name)
                    .hint_text("preset name")
                    .desired_width(120.0);
                let response = ui.add(entry);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                if (ui.button("➕ Create").clicked() || submitted)
                    && session.on_create_preset(&self.new_preset_name).is_ok()
                {
                    self.new_preset_name.clear();
                    action = PresetAction::Created;
                }
            });

            ui.add_space(ITEM_SPACING);

            // Preset dropdown and actions
            ui.horizontal(|ui| {
                let current = session.active().name().to_string();
                let mut selected: Option<String> = None;
                egui::ComboBox::from_id_salt("preset_selector")
                    .selected_text(&current)
                    .show_ui(ui, |ui| {
                        for name in session.preset_names() {
                            if ui.selectable_label(name == current, &name).clicked() {
                                selected = Some(name);
                            }
                        }
                    });
                if let Some(name) = selected {
                    session.on_select_preset(&name);
                    action = PresetAction::Selected;
                }

                if ui.button("💾 Save").clicked() && session.on_save_preset().is_ok() {
                    action = PresetAction::Saved;
                }

                if ui.button("🗑 Delete").clicked() {
                    // Default is refused straight away, no need to confirm
                    if session.active().is_default() {
                        if let Err(err) = session.on_delete_preset() {
                            debug!(error = %err, "Delete refused");
                        }
                    } else {
                        self.show_delete_confirm = true;
                    }
                }
            });
        });

        if self.show_delete_confirm {
            let deleted = self.delete_confirm_dialog(ui.ctx(), session);
            if deleted {
                action = PresetAction::Deleted;
            }
        }

        action
    }

    fn delete_confirm_dialog(&mut self, ctx: &egui::Context, session: &mut Session) -> bool {
        let mut deleted = false;

        egui::Window::new("Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Delete preset '{}'?", session.active().name()));
                ui.colored_label(STATUS_STOPPED, "This cannot be undone!");

                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        deleted = session.on_delete_preset().is_ok();
                        self.show_delete_confirm = false;
                    }

                    if ui.button("Cancel").clicked() {
                        self.show_delete_confirm = false;
                    }
                });
            });

        deleted
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresetAction {
    None,
    Selected,
    Created,
    Saved,
    Deleted,
}
