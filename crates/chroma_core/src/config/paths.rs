//! UserData directory layout.

use std::path::{Path, PathBuf};

const USER_DATA_DIR: &str = "UserData";
const CHROMA_DIR: &str = "Chroma";
const SETTINGS_FILE_NAME: &str = "settings.json";
const LOG_DIR: &str = "logs";

/// Paths under `<root>/UserData/Chroma`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataPaths {
    root: PathBuf,
}

impl UserDataPaths {
    /// `root` is the host application's working directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn chroma_dir(&self) -> PathBuf {
        self.root.join(USER_DATA_DIR).join(CHROMA_DIR)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.chroma_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.chroma_dir().join(LOG_DIR)
    }

    /// Creates the Chroma directory if missing.
    pub fn ensure_chroma_dir(&self) -> std::io::Result<PathBuf> {
        let dir = self.chroma_dir();
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
