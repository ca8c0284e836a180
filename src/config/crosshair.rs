//! Strongly-typed reticle configuration
//!
//! Raw text from the settings panel or from disk is converted here and nowhere
//! else. Size and opacity are clamped on the way in, so a `CrosshairConfig`
//! always holds values that are safe to draw and persist.

use std::fmt;
use tracing::debug;

use crate::constants::validation::*;

/// Reticle shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReticleKind {
    #[default]
    Standard,
    Circle,
    Dot,
    Plus,
    X,
    Cross,
    Target,
    Square,
    Diamond,
    Arrow,
}

impl ReticleKind {
    /// All styles in selector order
    pub const ALL: [ReticleKind; 10] = [
        ReticleKind::Standard,
        ReticleKind::Circle,
        ReticleKind::Dot,
        ReticleKind::Plus,
        ReticleKind::X,
        ReticleKind::Cross,
        ReticleKind::Target,
        ReticleKind::Square,
        ReticleKind::Diamond,
        ReticleKind::Arrow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReticleKind::Standard => "Standard",
            ReticleKind::Circle => "Circle",
            ReticleKind::Dot => "Dot",
            ReticleKind::Plus => "Plus",
            ReticleKind::X => "X",
            ReticleKind::Cross => "Cross",
            ReticleKind::Target => "Target",
            ReticleKind::Square => "Square",
            ReticleKind::Diamond => "Diamond",
            ReticleKind::Arrow => "Arrow",
        }
    }

    /// Parse the persisted name (case-sensitive, as written by `as_str`)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ReticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named reticle color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReticleColor {
    #[default]
    Red,
    Green,
    Blue,
    White,
    Yellow,
    Cyan,
    Magenta,
}

impl ReticleColor {
    pub const ALL: [ReticleColor; 7] = [
        ReticleColor::Red,
        ReticleColor::Green,
        ReticleColor::Blue,
        ReticleColor::White,
        ReticleColor::Yellow,
        ReticleColor::Cyan,
        ReticleColor::Magenta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReticleColor::Red => "red",
            ReticleColor::Green => "green",
            ReticleColor::Blue => "blue",
            ReticleColor::White => "white",
            ReticleColor::Yellow => "yellow",
            ReticleColor::Cyan => "cyan",
            ReticleColor::Magenta => "magenta",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.as_str() == name)
    }

    /// sRGB components
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ReticleColor::Red => (255, 0, 0),
            ReticleColor::Green => (0, 255, 0),
            ReticleColor::Blue => (0, 0, 255),
            ReticleColor::White => (255, 255, 255),
            ReticleColor::Yellow => (255, 255, 0),
            ReticleColor::Cyan => (0, 255, 255),
            ReticleColor::Magenta => (255, 0, 255),
        }
    }
}

impl fmt::Display for ReticleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete reticle configuration
///
/// `size` is always in `[MIN_SIZE, MAX_SIZE]` and `opacity` in
/// `[MIN_OPACITY, MAX_OPACITY]` when built through the helpers below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrosshairConfig {
    pub kind: ReticleKind,
    pub color: ReticleColor,
    pub size: u8,
    pub opacity: f32,
}

impl Default for CrosshairConfig {
    /// The hard default: Standard, red, size 20, fully opaque
    fn default() -> Self {
        Self {
            kind: ReticleKind::Standard,
            color: ReticleColor::Red,
            size: DEFAULT_SIZE,
            opacity: DEFAULT_OPACITY,
        }
    }
}

impl CrosshairConfig {
    /// Build a config from raw text values, coercing size and opacity
    pub fn from_raw(kind: ReticleKind, color: ReticleColor, size: &str, opacity: &str) -> Self {
        Self {
            kind,
            color,
            size: coerce_size(size),
            opacity: coerce_opacity(opacity),
        }
    }

    /// Size as persisted and shown in the text field
    pub fn size_text(&self) -> String {
        self.size.to_string()
    }

    /// Opacity as persisted and shown in the text field
    pub fn opacity_text(&self) -> String {
        format_opacity(self.opacity)
    }
}

/// Clamp an integer size into range
pub fn clamp_size(size: i64) -> u8 {
    // MAX_SIZE fits in u8
    size.clamp(MIN_SIZE, MAX_SIZE) as u8
}

/// Clamp an opacity into range. Non-finite values fall back to the default.
pub fn clamp_opacity(opacity: f32) -> f32 {
    if !opacity.is_finite() {
        return DEFAULT_OPACITY;
    }
    opacity.clamp(MIN_OPACITY, MAX_OPACITY)
}

/// Parse and clamp a size entered as text. Non-numeric input yields the default.
pub fn coerce_size(raw: &str) -> u8 {
    match raw.trim().parse::<i64>() {
        Ok(size) => {
            let clamped = clamp_size(size);
            if i64::from(clamped) != size {
                debug!(size, clamped, "size out of range, clamping");
            }
            clamped
        }
        Err(_) => {
            debug!(raw = %raw, default = DEFAULT_SIZE, "size is not an integer, using default");
            DEFAULT_SIZE
        }
    }
}

/// Parse and clamp an opacity entered as text. Non-numeric input yields the default.
pub fn coerce_opacity(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(opacity) if opacity.is_finite() => {
            let clamped = clamp_opacity(opacity);
            if clamped != opacity {
                debug!(opacity, clamped, "opacity out of range, clamping");
            }
            clamped
        }
        _ => {
            debug!(raw = %raw, default = DEFAULT_OPACITY, "opacity is not a number, using default");
            DEFAULT_OPACITY
        }
    }
}

/// Format opacity the way existing preset files store it: whole numbers keep
/// one decimal ("1.0"), everything else uses the shortest round-trip form.
pub fn format_opacity(opacity: f32) -> String {
    if opacity.fract() == 0.0 {
        format!("{opacity:.1}")
    } else {
        opacity.to_string()
    }
}
