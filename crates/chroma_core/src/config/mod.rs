//! User configuration collaborator.
//!
//! # Responsibility
//! - Load and hot-reload the user settings file.
//! - Expose read-only feature flags to the orchestrator.
//!
//! # Invariants
//! - A failed load never replaces previously loaded settings.
//! - A missing settings file is recreated with defaults.

mod file;
mod paths;
mod settings;

pub use file::FileSettingsStore;
pub use paths::UserDataPaths;
pub use settings::{ChromaSettings, SidePanel, TechnicolourStyle};

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Why settings are being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSettingsMode {
    /// First load during bootstrap.
    Initial,
    /// User-triggered hot reload.
    Manual,
}

impl LoadSettingsMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Manual => "manual",
        }
    }
}

/// Settings source the orchestrator reads flags from.
pub trait SettingsStore {
    /// Prepares backing storage.
    fn init(&mut self) -> Result<(), ConfigError>;

    fn load_settings(&mut self, mode: LoadSettingsMode) -> Result<(), ConfigError>;

    fn settings(&self) -> &ChromaSettings;
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Default settings could not be encoded for writing.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "settings io failed at `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "settings file `{}` is invalid: {source}", path.display())
            }
            Self::Serialize { path, source } => {
                write!(
                    f,
                    "settings for `{}` could not be serialized: {source}",
                    path.display()
                )
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize { source, .. } => Some(source),
        }
    }
}
