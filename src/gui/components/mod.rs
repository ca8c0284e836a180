pub mod preset_selector;
pub mod reticle_settings;
