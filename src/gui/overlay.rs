//! Transparent always-on-top overlay viewport
//!
//! Replays `render` output with an egui painter. Locked overlays pass mouse
//! input through to whatever is underneath; unlocked ones can be dragged with
//! the primary button.

use eframe::egui;

use crate::render::{render, DrawOp, Point};
use crate::session::Session;
use super::constants::{FALLBACK_SCREEN_HEIGHT, FALLBACK_SCREEN_WIDTH};

fn overlay_id() -> egui::ViewportId {
    egui::ViewportId::from_hash_of("crosshair_overlay")
}

/// Show the overlay for this frame. Does nothing while the overlay is stopped,
/// which lets egui close the viewport.
pub fn show(ctx: &egui::Context, session: &mut Session) {
    if !session.is_running() {
        return;
    }

    let (screen_width, screen_height) = screen_size(ctx);
    let side = session.overlay_side() as f32;
    let (x, y) = session.overlay_origin(screen_width as i32, screen_height as i32);

    let builder = egui::ViewportBuilder::default()
        .with_title("Crosshair Overlay")
        .with_decorations(false)
        .with_transparent(true)
        .with_always_on_top()
        .with_resizable(false)
        .with_taskbar(false)
        .with_mouse_passthrough(session.is_locked())
        .with_inner_size([side, side])
        .with_position([x as f32, y as f32]);

    ctx.show_viewport_immediate(overlay_id(), builder, |ctx, _class| {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.max_rect();

                if !session.is_locked() {
                    drag(ui, ctx, rect, session, (x, y));
                }

                let config = *session.settings();
                let ops = render(&config, rect.width() as u32, rect.height() as u32);
                let alpha = (config.opacity * 255.0).round() as u8;
                paint(ui.painter(), rect.min, &ops, alpha);
            });
    });
}

/// Move the window so the point grabbed at press time stays under the pointer.
///
/// The offset is measured against the window's real position when the backend
/// reports one, so frames rendered before the move lands don't overshoot.
fn drag(ui: &mut egui::Ui, ctx: &egui::Context, rect: egui::Rect, session: &mut Session, origin: Point) {
    let id = ui.id().with("drag");
    let response = ui.interact(rect, id, egui::Sense::drag());

    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            ui.memory_mut(|m| m.data.insert_temp(id, pos));
        }
    }
    if !response.dragged_by(egui::PointerButton::Primary) {
        return;
    }

    let press = ui.memory(|m| m.data.get_temp::<egui::Pos2>(id));
    let (Some(press), Some(pointer)) = (press, response.interact_pointer_pos()) else {
        return;
    };
    let current = ctx
        .input(|i| i.viewport().outer_rect)
        .map(|outer| (outer.min.x.round() as i32, outer.min.y.round() as i32))
        .unwrap_or(origin);
    let delta = pointer - press;
    session.drag_overlay(current, (delta.x.round() as i32, delta.y.round() as i32));
}

fn screen_size(ctx: &egui::Context) -> (f32, f32) {
    ctx.input(|i| i.viewport().monitor_size)
        .map(|size| (size.x, size.y))
        .unwrap_or((FALLBACK_SCREEN_WIDTH, FALLBACK_SCREEN_HEIGHT))
}

fn to_pos(origin: egui::Pos2, (x, y): Point) -> egui::Pos2 {
    origin + egui::vec2(x as f32, y as f32)
}

/// Draw primitives relative to `origin` with a uniform alpha
pub fn paint(painter: &egui::Painter, origin: egui::Pos2, ops: &[DrawOp], alpha: u8) {
    for op in ops {
        match *op {
            DrawOp::Line { from, to, width, color } => {
                let stroke = egui::Stroke::new(f32::from(width), color32(color.rgb(), alpha));
                painter.line_segment([to_pos(origin, from), to_pos(origin, to)], stroke);
            }
            DrawOp::Circle { center, radius, width, color, filled } => {
                let fill = color32(color.rgb(), alpha);
                let center = to_pos(origin, center);
                if filled {
                    painter.circle_filled(center, radius as f32, fill);
                } else {
                    painter.circle_stroke(center, radius as f32, egui::Stroke::new(f32::from(width), fill));
                }
            }
            DrawOp::Rect { min, max, width, color } => {
                let rect = egui::Rect::from_min_max(to_pos(origin, min), to_pos(origin, max));
                let stroke = egui::Stroke::new(f32::from(width), color32(color.rgb(), alpha));
                painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
            }
        }
    }
}

fn color32((r, g, b): (u8, u8, u8), alpha: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(r, g, b, alpha)
}
