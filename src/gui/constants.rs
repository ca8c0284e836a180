//! GUI-specific constants for layout, status colors and fallbacks

/// Control panel window dimensions
pub const WINDOW_WIDTH: f32 = 400.0;
pub const WINDOW_HEIGHT: f32 = 700.0;
pub const WINDOW_MIN_WIDTH: f32 = 360.0;
pub const WINDOW_MIN_HEIGHT: f32 = 520.0;

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const BUTTON_WIDTH: f32 = 130.0;
pub const NUMBER_FIELD_WIDTH: f32 = 45.0;

/// Status colors
pub const STATUS_RUNNING: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_STOPPED: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const FEEDBACK_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 140, 255);

/// Used when the backend does not report the monitor size
pub const FALLBACK_SCREEN_WIDTH: f32 = 1920.0;
pub const FALLBACK_SCREEN_HEIGHT: f32 = 1080.0;
