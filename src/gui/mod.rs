//! egui control panel and overlay viewport

mod components;
mod constants;
mod manager;
mod overlay;

pub use manager::run_gui;
