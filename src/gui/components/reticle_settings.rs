//! Reticle settings editor: type, color, size and opacity

use eframe::egui;
use crate::config::{ReticleColor, ReticleKind};
use crate::constants::validation::{MAX_OPACITY, MAX_SIZE, MIN_OPACITY, MIN_SIZE};
use crate::gui::constants::*;
use crate::session::{Session, SettingField};

/// Renders the settings editor and returns true if any setting was applied
pub fn ui(ui: &mut egui::Ui, session: &mut Session) -> bool {
    let mut changed = false;

    ui.group(|ui| {
        ui.label(egui::RichText::new("Crosshair Settings").strong());
        ui.add_space(ITEM_SPACING);

        // Type
        ui.horizontal(|ui| {
            ui.label("Type:");
            let current = session.settings().kind;
            let mut picked: Option<ReticleKind> = None;
            egui::ComboBox::from_id_salt("reticle_kind")
                .selected_text(current.as_str())
                .show_ui(ui, |ui| {
                    for kind in ReticleKind::ALL {
                        if ui.selectable_label(kind == current, kind.as_str()).clicked() {
                            picked = Some(kind);
                        }
                    }
                });
            if let Some(kind) = picked {
                session.on_setting_changed(SettingField::Kind, kind.as_str());
                changed = true;
            }
        });

        // Color
        ui.horizontal(|ui| {
            ui.label("Color:");
            let current = session.settings().color;
            let mut picked: Option<ReticleColor> = None;
            egui::ComboBox::from_id_salt("reticle_color")
                .selected_text(current.as_str())
                .show_ui(ui, |ui| {
                    for color in ReticleColor::ALL {
                        let (r, g, b) = color.rgb();
                        let label = egui::RichText::new(color.as_str())
                            .color(egui::Color32::from_rgb(r, g, b));
                        if ui.selectable_label(color == current, label).clicked() {
                            picked = Some(color);
                        }
                    }
                });
            if let Some(color) = picked {
                session.on_setting_changed(SettingField::Color, color.as_str());
                changed = true;
            }
        });

        ui.add_space(ITEM_SPACING);

        // Size: text field commits on Enter or focus loss, slider commits live
        ui.horizontal(|ui| {
            ui.label("Size:");
            let field = egui::TextEdit::singleline(&mut session.size_text)
                .desired_width(NUMBER_FIELD_WIDTH);
            if ui.add(field).lost_focus() {
                session.commit_size_text();
                changed = true;
            }

            let mut size = i64::from(session.settings().size);
            if ui.add(egui::Slider::new(&mut size, MIN_SIZE..=MAX_SIZE).show_value(false)).changed() {
                session.on_setting_changed(SettingField::Size, &size.to_string());
                changed = true;
            }
        });

        // Opacity
        ui.horizontal(|ui| {
            ui.label("Opacity:");
            let field = egui::TextEdit::singleline(&mut session.opacity_text)
                .desired_width(NUMBER_FIELD_WIDTH);
            if ui.add(field).lost_focus() {
                session.commit_opacity_text();
                changed = true;
            }

            let mut opacity = session.settings().opacity;
            let slider = egui::Slider::new(&mut opacity, MIN_OPACITY..=MAX_OPACITY)
                .step_by(0.1)
                .show_value(false);
            if ui.add(slider).changed() {
                // Round to the slider resolution so files keep "0.3", not "0.30000001"
                let rounded = (opacity * 10.0).round() / 10.0;
                session.on_setting_changed(SettingField::Opacity, &rounded.to_string());
                changed = true;
            }
        });
    });

    changed
}
