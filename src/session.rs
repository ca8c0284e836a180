//! Application session
//!
//! Everything the control panel can change lives here: the preset collection,
//! the active selection, the editable settings, the overlay run/lock flags and
//! the transient feedback line. The GUI only reads this state and forwards
//! user actions to the `on_*` handlers, so all of the behavior is testable
//! without a window.

use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::crosshair::{coerce_opacity, coerce_size};
use crate::config::{
    ActivePreset, ConfigStore, CrosshairConfig, Flush, LastState, PresetStore, ReticleColor,
    ReticleKind,
};
use crate::constants::config::DEFAULT_PRESET_NAME;
use crate::constants::feedback::DISPLAY_MS;
use crate::error::PresetError;
use crate::render::{centered_origin, overlay_window_size, Point};

/// Whether the overlay window is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Stopped,
    Running,
}

/// Whether the overlay can be dragged around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

/// A control that edits one reticle setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Kind,
    Color,
    Size,
    Opacity,
}

/// Where the overlay window sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Centered for the current side length
    Centered,
    /// Left where a window of this side length would be centered
    CenteredFor(u32),
    /// Explicit top-left, set by a drag
    At(Point),
}

/// Message shown under the controls until it expires
#[derive(Debug, Clone)]
pub struct Feedback {
    pub text: String,
    shown_at: Instant,
}

pub struct Session {
    store: ConfigStore,
    presets: PresetStore,
    active: ActivePreset,
    settings: CrosshairConfig,
    /// Text shown in the size field; rewritten to the coerced value on commit
    pub size_text: String,
    /// Text shown in the opacity field; rewritten to the coerced value on commit
    pub opacity_text: String,
    overlay: OverlayState,
    lock: LockState,
    placement: Placement,
    feedback: Option<Feedback>,
}

impl Session {
    /// Load presets and last state and apply the resolved configuration
    pub fn start(store: ConfigStore) -> Self {
        let (presets, last_state) = store.load();
        let settings = ConfigStore::resolve_active(&presets, &last_state);
        info!(active = %last_state.active.name(), ?settings, "Session started");

        Self {
            store,
            presets,
            active: last_state.active,
            size_text: settings.size_text(),
            opacity_text: settings.opacity_text(),
            settings,
            overlay: OverlayState::Stopped,
            lock: LockState::Locked,
            placement: Placement::Centered,
            feedback: None,
        }
    }

    pub fn settings(&self) -> &CrosshairConfig {
        &self.settings
    }

    pub fn active(&self) -> &ActivePreset {
        &self.active
    }

    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    pub fn config_dir(&self) -> &std::path::Path {
        self.store.dir()
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.overlay
    }

    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    pub fn is_running(&self) -> bool {
        self.overlay == OverlayState::Running
    }

    pub fn is_locked(&self) -> bool {
        self.lock == LockState::Locked
    }

    /// Names for the preset selector: stored presets, then Default
    pub fn preset_names(&self) -> Vec<String> {
        self.presets
            .keys()
            .cloned()
            .chain(std::iter::once(DEFAULT_PRESET_NAME.to_string()))
            .collect()
    }

    fn last_state(&self) -> LastState {
        LastState {
            active: self.active.clone(),
            settings: self.settings,
        }
    }

    fn persist_last_state(&mut self) {
        if let Err(e) = self.store.persist_last_state(&self.last_state()) {
            self.show_feedback(format!("Warning: settings not saved ({e})"));
        }
    }

    fn apply_settings(&mut self, settings: CrosshairConfig) {
        if self.is_locked() {
            self.placement = Placement::Centered;
        } else if self.placement == Placement::Centered {
            // Unlocked windows only resize in place
            self.placement = Placement::CenteredFor(self.overlay_side());
        }
        self.settings = settings;
        self.size_text = settings.size_text();
        self.opacity_text = settings.opacity_text();
    }

    // ------------------------------------------------------------------
    // Preset handlers
    // ------------------------------------------------------------------

    /// Create a preset from the current settings
    pub fn on_create_preset(&mut self, name: &str) -> Result<(), PresetError> {
        let result = self.store.create_preset(&mut self.presets, name, self.settings);
        match result {
            Ok(flush) => {
                self.report_flush(flush, format!("Preset '{}' created", name.trim()));
                Ok(())
            }
            Err(e) => {
                self.show_feedback(e.to_string());
                Err(e)
            }
        }
    }

    /// Store the current settings under the active preset name
    pub fn on_save_preset(&mut self) -> Result<(), PresetError> {
        let name = self.active.name().to_string();
        match self.store.save_preset(&mut self.presets, &name, self.settings) {
            Ok(flush) => {
                self.report_flush(flush, format!("Preset '{name}' saved"));
                Ok(())
            }
            Err(PresetError::ProtectedPreset) => {
                self.show_feedback("Cannot overwrite Default preset. Create a new one instead.");
                Err(PresetError::ProtectedPreset)
            }
            Err(e) => {
                self.show_feedback(e.to_string());
                Err(e)
            }
        }
    }

    /// Delete the active preset and fall back to Default.
    ///
    /// The current settings stay on screen until another preset is selected.
    pub fn on_delete_preset(&mut self) -> Result<(), PresetError> {
        let name = self.active.name().to_string();
        match self.store.delete_preset(&mut self.presets, &name) {
            Ok(flush) => {
                self.active = ActivePreset::Default;
                self.report_flush(flush, format!("Preset '{name}' deleted"));
                Ok(())
            }
            Err(PresetError::ProtectedPreset) => {
                self.show_feedback("Cannot delete Default preset");
                Err(PresetError::ProtectedPreset)
            }
            Err(e) => {
                self.show_feedback(e.to_string());
                Err(e)
            }
        }
    }

    /// Make `name` the active preset and load its settings.
    ///
    /// Default loads the hard default. An unlisted name only becomes the
    /// active selection so that a later save can create it.
    pub fn on_select_preset(&mut self, name: &str) {
        self.active = ActivePreset::from_name(name);
        match self.active.clone() {
            ActivePreset::Default => {
                self.apply_settings(CrosshairConfig::default());
                self.show_feedback("Default preset loaded");
            }
            ActivePreset::Named(name) => match self.presets.get(&name).copied() {
                Some(config) => {
                    let message = format!("Preset '{name}' loaded");
                    self.apply_settings(config);
                    self.show_feedback(message);
                }
                None => {
                    warn!(preset = %name, "Selected preset is not stored");
                    let message = format!("Preset '{name}' selected");
                    self.show_feedback(message);
                }
            },
        }
        self.persist_last_state();
    }

    /// Show the outcome of a preset mutation and snapshot the last state with it
    fn report_flush(&mut self, flush: Flush, message: String) {
        match flush {
            Flush::Written => {
                self.show_feedback(message);
                self.persist_last_state();
            }
            Flush::Failed(e) => self.show_feedback(format!("{message} (not saved to disk: {e})")),
        }
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Apply raw input from a settings control.
    ///
    /// Size and opacity are clamped or reset to their defaults; an unknown
    /// type or color name keeps the previous value. The text fields are
    /// rewritten to the value actually applied.
    pub fn on_setting_changed(&mut self, field: SettingField, raw: &str) {
        let mut settings = self.settings;
        let message = match field {
            SettingField::Kind => match ReticleKind::parse(raw) {
                Some(kind) => {
                    settings.kind = kind;
                    format!("Crosshair type changed to {kind}")
                }
                None => {
                    warn!(kind = %raw, "Ignoring unknown crosshair type");
                    return;
                }
            },
            SettingField::Color => match ReticleColor::parse(raw) {
                Some(color) => {
                    settings.color = color;
                    "Settings updated".to_string()
                }
                None => {
                    warn!(color = %raw, "Ignoring unknown crosshair color");
                    return;
                }
            },
            SettingField::Size => {
                settings.size = coerce_size(raw);
                "Settings updated".to_string()
            }
            SettingField::Opacity => {
                settings.opacity = coerce_opacity(raw);
                "Settings updated".to_string()
            }
        };

        self.apply_settings(settings);
        self.show_feedback(message);
        self.persist_last_state();
    }

    /// Commit whatever is currently typed in the size field
    pub fn commit_size_text(&mut self) {
        let raw = self.size_text.clone();
        self.on_setting_changed(SettingField::Size, &raw);
    }

    /// Commit whatever is currently typed in the opacity field
    pub fn commit_opacity_text(&mut self) {
        let raw = self.opacity_text.clone();
        self.on_setting_changed(SettingField::Opacity, &raw);
    }

    // ------------------------------------------------------------------
    // Overlay state
    // ------------------------------------------------------------------

    pub fn start_overlay(&mut self) {
        if self.overlay == OverlayState::Running {
            return;
        }
        self.overlay = OverlayState::Running;
        info!("Overlay started");
        self.show_feedback("Overlay started");
    }

    pub fn stop_overlay(&mut self) {
        if self.overlay == OverlayState::Stopped {
            return;
        }
        self.overlay = OverlayState::Stopped;
        info!("Overlay stopped");
        self.show_feedback("Overlay stopped");
    }

    pub fn toggle_overlay(&mut self) {
        match self.overlay {
            OverlayState::Running => self.stop_overlay(),
            OverlayState::Stopped => self.start_overlay(),
        }
    }

    pub fn toggle_lock(&mut self) {
        self.lock = match self.lock {
            LockState::Locked => {
                self.show_feedback("Overlay unlocked - can be moved");
                LockState::Unlocked
            }
            LockState::Unlocked => {
                self.show_feedback("Overlay locked in place");
                LockState::Locked
            }
        };
    }

    /// Reset is only offered while the overlay runs unlocked
    pub fn can_reset(&self) -> bool {
        self.is_running() && !self.is_locked()
    }

    /// Move the overlay back to the screen center. Returns false when refused.
    pub fn reset_position(&mut self) -> bool {
        if !self.can_reset() {
            return false;
        }
        self.placement = Placement::Centered;
        self.show_feedback("Overlay position reset to center");
        true
    }

    /// Record a drag of the overlay window. Ignored while locked.
    pub fn drag_overlay(&mut self, current_origin: Point, delta: Point) {
        if self.is_locked() {
            return;
        }
        self.placement = Placement::At((current_origin.0 + delta.0, current_origin.1 + delta.1));
    }

    /// Side length of the overlay window
    pub fn overlay_side(&self) -> u32 {
        overlay_window_size(self.settings.size)
    }

    /// Where the overlay window should be on a screen of the given size
    pub fn overlay_origin(&self, screen_width: i32, screen_height: i32) -> Point {
        match self.placement {
            Placement::Centered => {
                centered_origin(screen_width, screen_height, self.overlay_side() as i32)
            }
            Placement::CenteredFor(side) => centered_origin(screen_width, screen_height, side as i32),
            Placement::At(origin) => origin,
        }
    }

    // ------------------------------------------------------------------
    // Feedback
    // ------------------------------------------------------------------

    pub fn show_feedback(&mut self, text: impl Into<String>) {
        self.feedback = Some(Feedback {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// Feedback text if it has not expired yet
    pub fn visible_feedback(&self, now: Instant) -> Option<&str> {
        self.feedback_remaining(now)?;
        self.feedback.as_ref().map(|f| f.text.as_str())
    }

    /// Time left before the current feedback expires
    pub fn feedback_remaining(&self, now: Instant) -> Option<Duration> {
        let feedback = self.feedback.as_ref()?;
        let elapsed = now.saturating_duration_since(feedback.shown_at);
        Duration::from_millis(DISPLAY_MS)
            .checked_sub(elapsed)
            .filter(|remaining| !remaining.is_zero())
    }

    // ------------------------------------------------------------------
    // Shutdown
    // ------------------------------------------------------------------

    /// Flush everything before the windows are released
    pub fn on_exit(&mut self) {
        info!(active = %self.active.name(), "Saving state before exit");
        if let Err(e) = self.store.persist(&self.presets, &self.last_state()) {
            warn!(error = %e, "State was not saved on exit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::TestDir;
    use std::fs;

    fn session(dir: &TestDir) -> Session {
        Session::start(ConfigStore::new(dir.path()))
    }

    fn sniper() -> CrosshairConfig {
        CrosshairConfig::from_raw(ReticleKind::Circle, ReticleColor::Green, "10", "0.8")
    }

    fn feedback(session: &Session) -> Option<&str> {
        session.visible_feedback(Instant::now())
    }

    #[test]
    fn test_start_with_empty_dir_uses_default() {
        let dir = TestDir::new("session_empty");
        let session = session(&dir);

        assert_eq!(session.active(), &ActivePreset::Default);
        assert_eq!(session.settings(), &CrosshairConfig::default());
        assert_eq!(session.size_text, "20");
        assert_eq!(session.opacity_text, "1.0");
        assert_eq!(session.overlay_state(), OverlayState::Stopped);
        assert_eq!(session.lock_state(), LockState::Locked);
        assert_eq!(session.preset_names(), vec!["Default".to_string()]);
    }

    #[test]
    fn test_setting_changes_clamp_and_rewrite_text() {
        let dir = TestDir::new("session_settings");
        let mut session = session(&dir);

        session.on_setting_changed(SettingField::Size, "0");
        assert_eq!(session.settings().size, 1);
        assert_eq!(session.size_text, "1");

        session.on_setting_changed(SettingField::Size, "150");
        assert_eq!(session.settings().size, 100);

        session.size_text = "big".to_string();
        session.commit_size_text();
        assert_eq!(session.settings().size, 20);
        assert_eq!(session.size_text, "20");

        session.on_setting_changed(SettingField::Opacity, "2");
        assert_eq!(session.settings().opacity, 1.0);
        session.on_setting_changed(SettingField::Opacity, "0.01");
        assert_eq!(session.settings().opacity, 0.1);
        assert_eq!(session.opacity_text, "0.1");

        session.opacity_text = "clear".to_string();
        session.commit_opacity_text();
        assert_eq!(session.settings().opacity, 1.0);
        assert_eq!(feedback(&session), Some("Settings updated"));
    }

    #[test]
    fn test_unknown_kind_or_color_keeps_previous_value() {
        let dir = TestDir::new("session_unknown");
        let mut session = session(&dir);
        session.on_setting_changed(SettingField::Kind, "Diamond");
        assert_eq!(feedback(&session), Some("Crosshair type changed to Diamond"));

        session.on_setting_changed(SettingField::Kind, "Hexagon");
        session.on_setting_changed(SettingField::Color, "orange");

        assert_eq!(session.settings().kind, ReticleKind::Diamond);
        assert_eq!(session.settings().color, ReticleColor::Red);
    }

    #[test]
    fn test_setting_change_persists_last_state() {
        let dir = TestDir::new("session_last_state");
        let mut session = session(&dir);

        session.on_setting_changed(SettingField::Color, "cyan");

        let contents = fs::read_to_string(dir.path().join("last_state.json")).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(raw["current_preset"], "Default");
        assert_eq!(raw["settings"]["color"], "cyan");
    }

    #[test]
    fn test_default_settings_are_not_restored_on_restart() {
        let dir = TestDir::new("session_default_quirk");
        {
            let mut session = session(&dir);
            session.on_setting_changed(SettingField::Size, "77");
            session.on_exit();
        }

        let restarted = session(&dir);
        assert_eq!(restarted.active(), &ActivePreset::Default);
        assert_eq!(restarted.settings(), &CrosshairConfig::default());
    }

    #[test]
    fn test_named_preset_is_restored_on_restart() {
        let dir = TestDir::new("session_restore");
        {
            let mut session = session(&dir);
            session.on_setting_changed(SettingField::Kind, "Circle");
            session.on_setting_changed(SettingField::Color, "green");
            session.on_setting_changed(SettingField::Size, "10");
            session.on_setting_changed(SettingField::Opacity, "0.8");
            session.on_create_preset("sniper").unwrap();
            session.on_select_preset("sniper");
            session.on_exit();
        }

        let restarted = session(&dir);
        assert_eq!(restarted.active(), &ActivePreset::Named("sniper".to_string()));
        assert_eq!(restarted.settings(), &sniper());
        assert_eq!(restarted.size_text, "10");
        assert_eq!(restarted.opacity_text, "0.8");
    }

    #[test]
    fn test_create_preset_feedback() {
        let dir = TestDir::new("session_create");
        let mut session = session(&dir);

        session.on_create_preset("  wide ").unwrap();
        assert_eq!(feedback(&session), Some("Preset 'wide' created"));
        assert_eq!(session.preset_names(), vec!["wide".to_string(), "Default".to_string()]);

        assert_eq!(session.on_create_preset("wide"), Err(PresetError::DuplicateName("wide".to_string())));
        assert_eq!(feedback(&session), Some("Preset 'wide' already exists"));

        assert_eq!(session.on_create_preset(""), Err(PresetError::InvalidName));
        assert_eq!(feedback(&session), Some("Please enter a valid preset name"));

        assert!(session.on_create_preset("Default").is_err());
        assert_eq!(session.presets().len(), 1);
    }

    #[test]
    fn test_save_under_default_is_refused() {
        let dir = TestDir::new("session_save_default");
        let mut session = session(&dir);

        assert_eq!(session.on_save_preset(), Err(PresetError::ProtectedPreset));
        assert_eq!(
            feedback(&session),
            Some("Cannot overwrite Default preset. Create a new one instead.")
        );
        assert!(session.presets().is_empty());
    }

    #[test]
    fn test_save_after_selecting_unlisted_name_creates_it() {
        let dir = TestDir::new("session_save_unlisted");
        let mut session = session(&dir);
        session.on_setting_changed(SettingField::Size, "42");

        session.on_select_preset("fresh");
        assert_eq!(session.settings().size, 42);
        session.on_save_preset().unwrap();

        assert_eq!(session.presets()["fresh"].size, 42);
        assert_eq!(feedback(&session), Some("Preset 'fresh' saved"));
    }

    #[test]
    fn test_delete_active_preset_falls_back_to_default() {
        let dir = TestDir::new("session_delete");
        let mut session = session(&dir);
        session.on_setting_changed(SettingField::Kind, "Square");
        session.on_create_preset("boxy").unwrap();
        session.on_select_preset("boxy");

        session.on_delete_preset().unwrap();

        assert_eq!(session.active(), &ActivePreset::Default);
        assert!(session.presets().is_empty());
        assert_eq!(feedback(&session), Some("Preset 'boxy' deleted"));
        // Settings stay until the next selection
        assert_eq!(session.settings().kind, ReticleKind::Square);

        let restarted = Session::start(ConfigStore::new(dir.path()));
        assert_eq!(restarted.active(), &ActivePreset::Default);
        assert!(restarted.presets().is_empty());
    }

    #[test]
    fn test_delete_default_is_refused() {
        let dir = TestDir::new("session_delete_default");
        let mut session = session(&dir);

        assert_eq!(session.on_delete_preset(), Err(PresetError::ProtectedPreset));
        assert_eq!(feedback(&session), Some("Cannot delete Default preset"));
    }

    #[test]
    fn test_select_default_loads_hard_default() {
        let dir = TestDir::new("session_select_default");
        let mut session = session(&dir);
        session.on_setting_changed(SettingField::Size, "90");

        session.on_select_preset("Default");

        assert_eq!(session.settings(), &CrosshairConfig::default());
        assert_eq!(feedback(&session), Some("Default preset loaded"));
    }

    #[test]
    fn test_overlay_state_machine() {
        let dir = TestDir::new("session_overlay");
        let mut session = session(&dir);

        session.toggle_overlay();
        assert!(session.is_running());
        assert_eq!(feedback(&session), Some("Overlay started"));
        session.toggle_overlay();
        assert_eq!(session.overlay_state(), OverlayState::Stopped);
        assert_eq!(feedback(&session), Some("Overlay stopped"));
    }

    #[test]
    fn test_toggle_lock_feedback() {
        let dir = TestDir::new("session_lock");
        let mut session = session(&dir);

        session.toggle_lock();
        assert!(!session.is_locked());
        assert_eq!(feedback(&session), Some("Overlay unlocked - can be moved"));
        session.toggle_lock();
        assert_eq!(session.lock_state(), LockState::Locked);
        assert_eq!(feedback(&session), Some("Overlay locked in place"));
    }

    #[test]
    fn test_reset_requires_running_and_unlocked() {
        let dir = TestDir::new("session_reset");
        let mut session = session(&dir);

        // Stopped + Locked
        assert!(!session.reset_position());
        session.toggle_lock();
        // Stopped + Unlocked
        assert!(!session.can_reset());
        assert!(!session.reset_position());
        session.start_overlay();
        // Running + Unlocked
        assert!(session.can_reset());
        assert!(session.reset_position());
        assert_eq!(feedback(&session), Some("Overlay position reset to center"));
        session.toggle_lock();
        // Running + Locked
        assert!(!session.reset_position());
    }

    #[test]
    fn test_drag_and_recenter() {
        let dir = TestDir::new("session_drag");
        let mut session = session(&dir);
        session.start_overlay();

        // Locked: drag ignored
        session.drag_overlay((920, 500), (10, 10));
        assert_eq!(session.overlay_origin(1920, 1080), (920, 500));

        session.toggle_lock();
        session.drag_overlay((920, 500), (-20, 35));
        assert_eq!(session.overlay_origin(1920, 1080), (900, 535));

        // Unlocked: resizing keeps the position
        session.on_setting_changed(SettingField::Size, "30");
        assert_eq!(session.overlay_side(), 120);
        assert_eq!(session.overlay_origin(1920, 1080), (900, 535));

        // Locked: any change recenters
        session.toggle_lock();
        session.on_setting_changed(SettingField::Size, "25");
        assert_eq!(session.overlay_origin(1920, 1080), (910, 490));
    }

    #[test]
    fn test_unlocked_resize_keeps_undragged_origin() {
        let dir = TestDir::new("session_resize_in_place");
        let mut session = session(&dir);
        session.start_overlay();
        session.toggle_lock();
        assert_eq!(session.overlay_origin(1920, 1080), (920, 500));

        session.on_setting_changed(SettingField::Size, "30");
        assert_eq!(session.overlay_side(), 120);
        assert_eq!(session.overlay_origin(1920, 1080), (920, 500));

        // Reset centers for the current side, later changes stay in place
        assert!(session.reset_position());
        assert_eq!(session.overlay_origin(1920, 1080), (900, 480));
        session.on_setting_changed(SettingField::Size, "10");
        assert_eq!(session.overlay_origin(1920, 1080), (900, 480));

        session.toggle_lock();
        session.on_setting_changed(SettingField::Color, "blue");
        assert_eq!(session.overlay_origin(1920, 1080), (940, 520));
    }

    #[test]
    fn test_write_failure_warns_and_keeps_state() {
        let dir = TestDir::new("session_write_failure");
        // A regular file where the config directory should be
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();
        let mut session = Session::start(ConfigStore::new(&blocker));

        session.on_setting_changed(SettingField::Size, "42");
        assert_eq!(session.settings().size, 42);
        assert_eq!(session.size_text, "42");
        let text = feedback(&session).unwrap();
        assert!(text.starts_with("Warning: settings not saved"), "{text}");

        session.on_create_preset("sniper").unwrap();
        assert_eq!(session.presets()["sniper"].size, 42);
        let text = feedback(&session).unwrap();
        assert!(text.starts_with("Preset 'sniper' created (not saved to disk:"), "{text}");

        session.on_select_preset("sniper");
        assert_eq!(session.active(), &ActivePreset::Named("sniper".to_string()));
        assert!(blocker.is_file());
    }

    #[test]
    fn test_feedback_expires_after_two_seconds() {
        let dir = TestDir::new("session_feedback");
        let mut session = session(&dir);
        session.show_feedback("hello");
        let now = Instant::now();

        assert_eq!(session.visible_feedback(now), Some("hello"));
        assert!(session.feedback_remaining(now).unwrap() <= Duration::from_millis(2000));
        assert_eq!(session.visible_feedback(now + Duration::from_millis(2001)), None);
    }
}
