//! Configuration management for the crosshair overlay
//!
//! - **crosshair**: typed reticle settings and input coercion
//! - **document**: JSON file shapes (string-typed numbers)
//! - **store**: preset and last-state persistence

pub mod crosshair;
pub mod document;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use crosshair::{CrosshairConfig, ReticleColor, ReticleKind};
pub use store::{ActivePreset, ConfigStore, Flush, LastState, PresetStore};
