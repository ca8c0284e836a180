//! Reticle geometry
//!
//! `render` turns a `CrosshairConfig` into a list of drawing primitives in
//! surface pixel coordinates. It knows nothing about windows or painters; the
//! overlay viewport replays the list with egui.

use crate::config::{CrosshairConfig, ReticleColor, ReticleKind};
use crate::constants::reticle::*;

/// Integer pixel coordinate on the drawing surface
pub type Point = (i32, i32);

/// A single vector drawing primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    Line {
        from: Point,
        to: Point,
        width: u8,
        color: ReticleColor,
    },
    Circle {
        center: Point,
        radius: i32,
        width: u8,
        color: ReticleColor,
        filled: bool,
    },
    /// Axis-aligned rectangle outline
    Rect {
        min: Point,
        max: Point,
        width: u8,
        color: ReticleColor,
    },
}

/// Build the primitives for `config` centered on a `width`×`height` surface.
///
/// Returns nothing while the surface is not realized (either side ≤ 1).
pub fn render(config: &CrosshairConfig, width: u32, height: u32) -> Vec<DrawOp> {
    if width <= 1 || height <= 1 {
        return Vec::new();
    }

    let pen = Pen {
        cx: (width / 2) as i32,
        cy: (height / 2) as i32,
        color: config.color,
    };
    let s = i32::from(config.size);

    match config.kind {
        ReticleKind::Standard => vec![
            pen.line((-s, 0), (s, 0), 2),
            pen.line((0, -s), (0, s), 2),
            pen.center_dot(),
        ],
        ReticleKind::Circle => vec![
            pen.circle(s, 2),
            pen.circle(s / 2, 2),
            pen.center_dot(),
        ],
        ReticleKind::Dot => vec![pen.disc(s / 4)],
        ReticleKind::Plus => vec![
            pen.line((-s, 0), (s, 0), 4),
            pen.line((0, -s), (0, s), 4),
        ],
        ReticleKind::X => vec![
            pen.line((-s, -s), (s, s), 2),
            pen.line((s, -s), (-s, s), 2),
        ],
        ReticleKind::Cross => {
            let t = CROSS_TICK;
            vec![
                pen.line((-s, 0), (s, 0), 2),
                pen.line((-s, 0), (-s + t, -t), 2),
                pen.line((-s, 0), (-s + t, t), 2),
                pen.line((s, 0), (s - t, -t), 2),
                pen.line((s, 0), (s - t, t), 2),
                pen.line((0, -s), (0, s), 2),
                pen.line((0, -s), (-t, -s + t), 2),
                pen.line((0, -s), (t, -s + t), 2),
                pen.line((0, s), (-t, s - t), 2),
                pen.line((0, s), (t, s - t), 2),
            ]
        }
        ReticleKind::Target => {
            let mut ops: Vec<DrawOp> = (1..=3).map(|i| pen.circle(s * i / 3, 1)).collect();
            ops.push(pen.center_dot());
            ops
        }
        ReticleKind::Square => vec![
            DrawOp::Rect {
                min: pen.at((-s, -s)),
                max: pen.at((s, s)),
                width: 2,
                color: pen.color,
            },
            pen.center_dot(),
        ],
        ReticleKind::Diamond => vec![
            pen.line((0, -s), (-s, 0), 2),
            pen.line((-s, 0), (0, s), 2),
            pen.line((0, s), (s, 0), 2),
            pen.line((s, 0), (0, -s), 2),
            pen.center_dot(),
        ],
        ReticleKind::Arrow => vec![
            pen.line((0, -s), (0, s), 2),
            pen.line((0, -s), (-ARROW_HEAD_SPREAD, -s + ARROW_HEAD_DROP), 2),
            pen.line((0, -s), (ARROW_HEAD_SPREAD, -s + ARROW_HEAD_DROP), 2),
            pen.center_dot(),
        ],
    }
}

/// Side length of the square overlay window for a reticle size
pub fn overlay_window_size(size: u8) -> u32 {
    u32::from(size) * WINDOW_SCALE
}

/// Top-left position that centers a square window of side `window` on the screen
pub fn centered_origin(screen_width: i32, screen_height: i32, window: i32) -> Point {
    (screen_width / 2 - window / 2, screen_height / 2 - window / 2)
}

/// Draws relative to the surface center
struct Pen {
    cx: i32,
    cy: i32,
    color: ReticleColor,
}

impl Pen {
    fn at(&self, (dx, dy): Point) -> Point {
        (self.cx + dx, self.cy + dy)
    }

    fn line(&self, from: Point, to: Point, width: u8) -> DrawOp {
        DrawOp::Line {
            from: self.at(from),
            to: self.at(to),
            width,
            color: self.color,
        }
    }

    fn circle(&self, radius: i32, width: u8) -> DrawOp {
        DrawOp::Circle {
            center: self.at((0, 0)),
            radius,
            width,
            color: self.color,
            filled: false,
        }
    }

    fn disc(&self, radius: i32) -> DrawOp {
        DrawOp::Circle {
            center: self.at((0, 0)),
            radius,
            width: 1,
            color: self.color,
            filled: true,
        }
    }

    fn center_dot(&self) -> DrawOp {
        self.disc(CENTER_DOT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kind: ReticleKind, size: u8) -> CrosshairConfig {
        CrosshairConfig {
            kind,
            color: ReticleColor::Green,
            size,
            opacity: 1.0,
        }
    }

    fn lines(ops: &[DrawOp]) -> usize {
        ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }

    fn has_center_dot(ops: &[DrawOp], center: Point) -> bool {
        ops.iter().any(|op| {
            *op == DrawOp::Circle {
                center,
                radius: 2,
                width: 1,
                color: ReticleColor::Green,
                filled: true,
            }
        })
    }

    #[test]
    fn test_render_standard_80x80() {
        let ops = render(&config(ReticleKind::Standard, 20), 80, 80);

        assert_eq!(
            ops,
            vec![
                DrawOp::Line { from: (20, 40), to: (60, 40), width: 2, color: ReticleColor::Green },
                DrawOp::Line { from: (40, 20), to: (40, 60), width: 2, color: ReticleColor::Green },
                DrawOp::Circle {
                    center: (40, 40),
                    radius: 2,
                    width: 1,
                    color: ReticleColor::Green,
                    filled: true
                },
            ]
        );
    }

    #[test]
    fn test_render_unrealized_surface_is_empty() {
        let standard = config(ReticleKind::Standard, 20);
        assert!(render(&standard, 0, 50).is_empty());
        assert!(render(&standard, 50, 1).is_empty());
        assert!(render(&standard, 1, 1).is_empty());
        assert!(!render(&standard, 2, 2).is_empty());
    }

    #[test]
    fn test_render_circle_radii() {
        let ops = render(&config(ReticleKind::Circle, 25), 100, 100);
        let radii: Vec<(i32, bool)> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { radius, filled, .. } => Some((*radius, *filled)),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![(25, false), (12, false), (2, true)]);
    }

    #[test]
    fn test_render_dot_quarter_size() {
        let ops = render(&config(ReticleKind::Dot, 20), 80, 80);
        assert_eq!(ops.len(), 1);
        assert!(matches!(ops[0], DrawOp::Circle { radius: 5, filled: true, .. }));
    }

    #[test]
    fn test_render_plus_has_thick_lines_and_no_dot() {
        let ops = render(&config(ReticleKind::Plus, 20), 80, 80);
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| matches!(op, DrawOp::Line { width: 4, .. })));
    }

    #[test]
    fn test_render_x_diagonals() {
        let ops = render(&config(ReticleKind::X, 10), 40, 40);
        assert_eq!(
            ops,
            vec![
                DrawOp::Line { from: (10, 10), to: (30, 30), width: 2, color: ReticleColor::Green },
                DrawOp::Line { from: (30, 10), to: (10, 30), width: 2, color: ReticleColor::Green },
            ]
        );
    }

    #[test]
    fn test_render_cross_has_eight_ticks() {
        let ops = render(&config(ReticleKind::Cross, 20), 80, 80);
        assert_eq!(lines(&ops), 10);
        assert_eq!(ops.len(), 10);
        // Left end tick
        assert!(ops.contains(&DrawOp::Line {
            from: (20, 40),
            to: (25, 35),
            width: 2,
            color: ReticleColor::Green
        }));
        // Bottom end tick
        assert!(ops.contains(&DrawOp::Line {
            from: (40, 60),
            to: (45, 55),
            width: 2,
            color: ReticleColor::Green
        }));
    }

    #[test]
    fn test_render_target_radii() {
        let ops = render(&config(ReticleKind::Target, 20), 80, 80);
        let outlines: Vec<i32> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { radius, filled: false, width: 1, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(outlines, vec![6, 13, 20]);
        assert!(has_center_dot(&ops, (40, 40)));
    }

    #[test]
    fn test_render_square_outline() {
        let ops = render(&config(ReticleKind::Square, 15), 60, 60);
        assert_eq!(
            ops[0],
            DrawOp::Rect { min: (15, 15), max: (45, 45), width: 2, color: ReticleColor::Green }
        );
        assert!(has_center_dot(&ops, (30, 30)));
    }

    #[test]
    fn test_render_diamond_closes_loop() {
        let ops = render(&config(ReticleKind::Diamond, 20), 80, 80);
        assert_eq!(lines(&ops), 4);
        let segments: Vec<(Point, Point)> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        for pair in segments.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(segments[3].1, segments[0].0);
        assert!(has_center_dot(&ops, (40, 40)));
    }

    #[test]
    fn test_render_arrow_head_at_top() {
        let ops = render(&config(ReticleKind::Arrow, 30), 120, 120);
        assert_eq!(lines(&ops), 3);
        assert!(ops.contains(&DrawOp::Line {
            from: (60, 30),
            to: (50, 45),
            width: 2,
            color: ReticleColor::Green
        }));
        assert!(ops.contains(&DrawOp::Line {
            from: (60, 30),
            to: (70, 45),
            width: 2,
            color: ReticleColor::Green
        }));
        assert!(has_center_dot(&ops, (60, 60)));
    }

    #[test]
    fn test_render_odd_surface_uses_floor_center() {
        let ops = render(&config(ReticleKind::Dot, 8), 81, 41);
        assert!(matches!(ops[0], DrawOp::Circle { center: (40, 20), radius: 2, .. }));
    }

    #[test]
    fn test_render_every_kind_is_nonempty() {
        for kind in ReticleKind::ALL {
            assert!(!render(&config(kind, 1), 8, 8).is_empty(), "{kind} rendered nothing");
        }
    }

    #[test]
    fn test_overlay_window_geometry() {
        assert_eq!(overlay_window_size(20), 80);
        assert_eq!(overlay_window_size(100), 400);
        assert_eq!(centered_origin(1920, 1080, 80), (920, 500));
        assert_eq!(centered_origin(1366, 768, 81), (643, 344));
    }
}
