//! Preset and last-state persistence
//!
//! `ConfigStore` owns the two JSON documents in the config directory:
//! - `presets.json`: the named preset collection
//! - `last_state.json`: the active preset name plus the settings last in use
//!
//! Loading fails soft: anything unreadable is logged and replaced with an empty
//! store. Writes replace whole documents via a temp file + rename, and a write
//! failure never undoes the in-memory change that triggered it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::crosshair::CrosshairConfig;
use super::document::{LastStateDocument, PresetsDocument, SettingsDocument};
use crate::constants::config::{APP_DIR, DEFAULT_PRESET_NAME, LAST_STATE_FILENAME, PRESETS_FILENAME};
use crate::error::{PersistenceError, PresetError};

/// Named presets, never containing the reserved "Default" name
pub type PresetStore = BTreeMap<String, CrosshairConfig>;

/// Which preset is selected
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActivePreset {
    /// The built-in preset, always the hard default configuration
    #[default]
    Default,
    Named(String),
}

impl ActivePreset {
    /// Map a name from the selector or the last-state document
    pub fn from_name(name: &str) -> Self {
        if name == DEFAULT_PRESET_NAME {
            ActivePreset::Default
        } else {
            ActivePreset::Named(name.to_string())
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ActivePreset::Default)
    }

    pub fn name(&self) -> &str {
        match self {
            ActivePreset::Default => DEFAULT_PRESET_NAME,
            ActivePreset::Named(name) => name,
        }
    }
}

/// Snapshot restored at startup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LastState {
    pub active: ActivePreset,
    pub settings: CrosshairConfig,
}

/// Outcome of a preset mutation that was accepted
///
/// The in-memory store is updated either way; `Failed` only means the change
/// did not reach disk.
#[derive(Debug)]
pub enum Flush {
    Written,
    Failed(PersistenceError),
}

impl Flush {
    pub fn is_written(&self) -> bool {
        matches!(self, Flush::Written)
    }
}

impl From<Result<(), PersistenceError>> for Flush {
    fn from(result: Result<(), PersistenceError>) -> Self {
        match result {
            Ok(()) => Flush::Written,
            Err(e) => Flush::Failed(e),
        }
    }
}

/// Reads and writes the preset and last-state documents in one directory
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform config directory, e.g. `~/.config/crosshair-overlay`
    pub fn default_dir() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn presets_path(&self) -> PathBuf {
        self.dir.join(PRESETS_FILENAME)
    }

    pub fn last_state_path(&self) -> PathBuf {
        self.dir.join(LAST_STATE_FILENAME)
    }

    /// Load both documents. Never fails; problems are logged and replaced by
    /// an empty store and a last state pointing at Default.
    pub fn load(&self) -> (PresetStore, LastState) {
        let presets = self.load_presets();
        let last_state = self.load_last_state();
        info!(
            presets = presets.len(),
            active = %last_state.active.name(),
            dir = %self.dir.display(),
            "Loaded crosshair config"
        );
        (presets, last_state)
    }

    fn load_presets(&self) -> PresetStore {
        let path = self.presets_path();
        if !path.exists() {
            info!(path = %path.display(), "Presets file not found, creating empty one");
            if let Err(e) = self.write_presets(&PresetStore::new()) {
                error!(path = %path.display(), error = %e, "Failed to create presets file");
            }
            return PresetStore::new();
        }

        match read_json::<PresetsDocument>(&path) {
            Ok(document) => document
                .into_iter()
                .filter_map(|(name, settings)| {
                    if name == DEFAULT_PRESET_NAME || name.trim().is_empty() {
                        warn!(name = %name, "Ignoring preset with reserved or empty name");
                        return None;
                    }
                    let config = settings.to_config(&name);
                    Some((name, config))
                })
                .collect(),
            Err(e) => {
                error!(error = %e, "Failed to load presets, starting with none");
                PresetStore::new()
            }
        }
    }

    fn load_last_state(&self) -> LastState {
        let path = self.last_state_path();
        if !path.exists() {
            return LastState::default();
        }

        match read_json::<LastStateDocument>(&path) {
            Ok(document) => LastState {
                active: ActivePreset::from_name(&document.current_preset),
                settings: document
                    .settings
                    .map(|s| s.to_config(LAST_STATE_FILENAME))
                    .unwrap_or_default(),
            },
            Err(e) => {
                error!(error = %e, "Failed to load last state, using Default");
                LastState::default()
            }
        }
    }

    /// Configuration to apply at startup.
    ///
    /// Only named presets are restored. When the last state points at Default
    /// or at a preset that no longer exists, the hard default is returned and
    /// the settings saved alongside it are ignored.
    pub fn resolve_active(presets: &PresetStore, last_state: &LastState) -> CrosshairConfig {
        match &last_state.active {
            ActivePreset::Named(name) => match presets.get(name) {
                Some(config) => *config,
                None => {
                    warn!(preset = %name, "Last used preset no longer exists, using Default");
                    CrosshairConfig::default()
                }
            },
            ActivePreset::Default => CrosshairConfig::default(),
        }
    }

    /// Add a new preset. The name is trimmed and must be unused.
    pub fn create_preset(
        &self,
        presets: &mut PresetStore,
        name: &str,
        config: CrosshairConfig,
    ) -> Result<Flush, PresetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresetError::InvalidName);
        }
        if name == DEFAULT_PRESET_NAME || presets.contains_key(name) {
            return Err(PresetError::DuplicateName(name.to_string()));
        }

        presets.insert(name.to_string(), config);
        info!(preset = %name, "Created preset");
        Ok(self.write_presets(presets).into())
    }

    /// Insert or overwrite a preset. Any name except Default is accepted.
    pub fn save_preset(
        &self,
        presets: &mut PresetStore,
        name: &str,
        config: CrosshairConfig,
    ) -> Result<Flush, PresetError> {
        if name == DEFAULT_PRESET_NAME {
            return Err(PresetError::ProtectedPreset);
        }
        if name.trim().is_empty() {
            return Err(PresetError::InvalidName);
        }

        presets.insert(name.to_string(), config);
        info!(preset = %name, "Saved preset");
        Ok(self.write_presets(presets).into())
    }

    /// Remove a preset. The caller must switch the active selection to Default.
    pub fn delete_preset(&self, presets: &mut PresetStore, name: &str) -> Result<Flush, PresetError> {
        if name == DEFAULT_PRESET_NAME {
            return Err(PresetError::ProtectedPreset);
        }
        if presets.remove(name).is_none() {
            return Err(PresetError::NotFound(name.to_string()));
        }

        info!(preset = %name, "Deleted preset");
        Ok(self.write_presets(presets).into())
    }

    /// Overwrite both documents
    pub fn persist(&self, presets: &PresetStore, last_state: &LastState) -> Result<(), PersistenceError> {
        self.write_presets(presets)?;
        self.persist_last_state(last_state)
    }

    /// Overwrite only the last-state document
    pub fn persist_last_state(&self, last_state: &LastState) -> Result<(), PersistenceError> {
        let document = LastStateDocument {
            current_preset: last_state.active.name().to_string(),
            settings: Some(SettingsDocument::from_config(&last_state.settings)),
        };
        write_json(&self.last_state_path(), &document)
            .inspect_err(|e| error!(error = %e, "Failed to save last state"))
    }

    fn write_presets(&self, presets: &PresetStore) -> Result<(), PersistenceError> {
        let document: PresetsDocument = presets
            .iter()
            .map(|(name, config)| (name.clone(), SettingsDocument::from_config(config)))
            .collect();
        write_json(&self.presets_path(), &document)
            .inspect_err(|e| error!(error = %e, "Failed to save presets"))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, PersistenceError> {
    let contents = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|source| PersistenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print to `<path>.tmp`, then rename over `path`
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
    }
    let contents = serde_json::to_string_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents).map_err(|e| PersistenceError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| PersistenceError::io(path, e))?;
    Ok(())
}
