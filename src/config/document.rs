//! On-disk JSON document shapes
//!
//! `size` and `opacity` are stored as strings for compatibility with existing
//! preset files. Everything in this module stays string-typed; conversion to
//! `CrosshairConfig` happens at the edges via `from_config` / `to_config`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::crosshair::{coerce_opacity, coerce_size, CrosshairConfig, ReticleColor, ReticleKind};
use crate::constants::config::DEFAULT_PRESET_NAME;

/// `presets.json`: preset name → settings
pub type PresetsDocument = BTreeMap<String, SettingsDocument>;

/// One set of reticle settings as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_size", deserialize_with = "deserialize_text_field")]
    pub size: String,
    #[serde(default = "default_opacity", deserialize_with = "deserialize_text_field")]
    pub opacity: String,
}

/// `last_state.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastStateDocument {
    #[serde(default = "default_preset_name")]
    pub current_preset: String,
    #[serde(default)]
    pub settings: Option<SettingsDocument>,
}

fn default_kind() -> String {
    ReticleKind::default().as_str().to_string()
}

fn default_color() -> String {
    ReticleColor::default().as_str().to_string()
}

fn default_size() -> String {
    CrosshairConfig::default().size_text()
}

fn default_opacity() -> String {
    CrosshairConfig::default().opacity_text()
}

fn default_preset_name() -> String {
    DEFAULT_PRESET_NAME.to_string()
}

/// Accepts both `"20"` and `20` so hand-edited files still load
fn deserialize_text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Int(i64),
        Float(f64),
    }

    match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => Ok(s),
        TextOrNumber::Int(i) => Ok(i.to_string()),
        TextOrNumber::Float(f) => Ok(f.to_string()),
    }
}

impl SettingsDocument {
    pub fn from_config(config: &CrosshairConfig) -> Self {
        Self {
            kind: config.kind.as_str().to_string(),
            color: config.color.as_str().to_string(),
            size: config.size_text(),
            opacity: config.opacity_text(),
        }
    }

    /// Convert to a typed config. Unknown names fall back to the defaults and
    /// numeric fields are clamped; `label` only identifies the entry in logs.
    pub fn to_config(&self, label: &str) -> CrosshairConfig {
        let kind = ReticleKind::parse(&self.kind).unwrap_or_else(|| {
            warn!(preset = %label, kind = %self.kind, "Unknown crosshair type, using Standard");
            ReticleKind::default()
        });
        let color = ReticleColor::parse(&self.color).unwrap_or_else(|| {
            warn!(preset = %label, color = %self.color, "Unknown crosshair color, using red");
            ReticleColor::default()
        });
        let config = CrosshairConfig {
            kind,
            color,
            size: coerce_size(&self.size),
            opacity: coerce_opacity(&self.opacity),
        };
        if config.size_text() != self.size.trim() {
            warn!(preset = %label, size = %self.size, using = config.size, "Invalid size in document");
        }
        config
    }
}

impl Default for LastStateDocument {
    fn default() -> Self {
        Self {
            current_preset: default_preset_name(),
            settings: None,
        }
    }
}
