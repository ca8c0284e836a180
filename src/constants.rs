//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Config file locations
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "crosshair-overlay";

    /// Named preset collection
    pub const PRESETS_FILENAME: &str = "presets.json";

    /// Last used preset and settings snapshot
    pub const LAST_STATE_FILENAME: &str = "last_state.json";

    /// Reserved name of the built-in preset
    pub const DEFAULT_PRESET_NAME: &str = "Default";
}

/// Accepted ranges and hard defaults for reticle settings
pub mod validation {
    pub const MIN_SIZE: i64 = 1;
    pub const MAX_SIZE: i64 = 100;
    pub const DEFAULT_SIZE: u8 = 20;

    pub const MIN_OPACITY: f32 = 0.1;
    pub const MAX_OPACITY: f32 = 1.0;
    pub const DEFAULT_OPACITY: f32 = 1.0;
}

/// Reticle geometry in pixels
pub mod reticle {
    /// Radius of the filled dot drawn at the center of most styles
    pub const CENTER_DOT_RADIUS: i32 = 2;

    /// Leg length of the arrow ticks at the ends of a Cross
    pub const CROSS_TICK: i32 = 5;

    /// Horizontal spread of the Arrow head ticks
    pub const ARROW_HEAD_SPREAD: i32 = 10;

    /// Vertical drop of the Arrow head ticks
    pub const ARROW_HEAD_DROP: i32 = 15;

    /// Overlay window side length as a multiple of the reticle size
    pub const WINDOW_SCALE: u32 = 4;
}

/// Transient feedback shown in the control panel
pub mod feedback {
    /// How long a feedback message stays visible
    pub const DISPLAY_MS: u64 = 2000;
}
