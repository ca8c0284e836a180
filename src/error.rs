//! Error types for preset management and persistence

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A preset operation was rejected. The store is left untouched.
///
/// The `Display` text is shown to the user as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresetError {
    #[error("Preset '{0}' already exists")]
    DuplicateName(String),

    #[error("Please enter a valid preset name")]
    InvalidName,

    #[error("The Default preset cannot be modified")]
    ProtectedPreset,

    #[error("Preset '{0}' not found")]
    NotFound(String),
}

/// Reading or writing a persisted document failed
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
