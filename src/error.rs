use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("No home directory")]
    NoHomeDir,

    #[error("Storage error at {}: {reason}", path.display())]
    Storage { path: PathBuf, reason: String },

    #[error("Commands file {} is corrupt: {reason}", path.display())]
    StorageCorrupt { path: PathBuf, reason: String },

    #[error("Description generation failed: {0}")]
    Generation(String),

    #[error("Clipboard copy failed: {0}")]
    Copy(String),

    #[error("No command provided")]
    EmptyCommand,
}

impl Error {
    /// True for failures reading or writing the commands document.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage { .. } | Error::StorageCorrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
