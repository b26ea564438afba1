//! JSON-file backed settings store.

use super::{ChromaSettings, ConfigError, LoadSettingsMode, SettingsStore, UserDataPaths};
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    settings: ChromaSettings,
}

impl FileSettingsStore {
    pub fn new(paths: &UserDataPaths) -> Self {
        Self::at(paths.settings_file())
    }

    /// Uses an explicit settings file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: ChromaSettings::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_defaults(&self) -> Result<(), ConfigError> {
        let body = serde_json::to_string_pretty(&ChromaSettings::default()).map_err(|source| {
            ConfigError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, body).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn init(&mut self) -> Result<(), ConfigError> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })
    }

    fn load_settings(&mut self, mode: LoadSettingsMode) -> Result<(), ConfigError> {
        if !self.path.exists() {
            warn!(
                "event=settings_load module=config status=skip mode={} reason=missing_file path={}",
                mode.as_str(),
                self.path.display()
            );
            self.write_defaults()?;
            self.settings = ChromaSettings::default();
            return Ok(());
        }

        let body = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let settings =
            serde_json::from_str::<ChromaSettings>(&body).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;

        self.settings = settings;
        info!(
            "event=settings_load module=config status=ok mode={} debug_mode={}",
            mode.as_str(),
            self.settings.debug_mode
        );
        Ok(())
    }

    fn settings(&self) -> &ChromaSettings {
        &self.settings
    }
}
