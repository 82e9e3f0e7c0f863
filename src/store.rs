//! Persistent command list.
//!
//! The document is a single JSON object `{"commands": [...]}`. Record order is
//! insertion order and doubles as identity.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{mlog_debug, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub command: String,
    pub description: String,
}

impl CommandRecord {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default)]
    pub commands: Vec<CommandRecord>,
}

impl Storage {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Reads and writes the commands document at a fixed path.
#[derive(Debug, Clone)]
pub struct CommandStore {
    path: PathBuf,
}

impl CommandStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing document is an empty list; anything else unreadable is an error.
    pub fn load(&self) -> Result<Storage> {
        mlog_debug!("CommandStore::load path={}", self.path.display());

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                mlog_debug!("Commands file not found, returning empty storage");
                return Ok(Storage::default());
            }
            Err(e) => return Err(self.storage_error(e)),
        };

        let storage: Storage =
            serde_json::from_str(&contents).map_err(|e| Error::StorageCorrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        mlog_debug!("Storage loaded: {} commands", storage.len());
        Ok(storage)
    }

    /// Write the whole document. The previous version is kept as `.json.bak`
    /// and the new one lands through a temp file rename.
    pub fn save(&self, storage: &Storage) -> Result<()> {
        mlog_debug!(
            "CommandStore::save commands={} path={}",
            storage.len(),
            self.path.display()
        );
        let contents = serde_json::to_string_pretty(storage)?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                mlog_debug!("Creating storage directory: {}", dir.display());
                fs::create_dir_all(dir).map_err(|e| self.storage_error(e))?;
            }
        }

        if self.path.exists() {
            let backup_path = self.path.with_extension("json.bak");
            fs::copy(&self.path, &backup_path).map_err(|e| self.storage_error(e))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &contents).map_err(|e| self.storage_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.storage_error(e))?;
        mlog_debug!("Storage saved: {}", self.path.display());

        Ok(())
    }

    fn storage_error(&self, e: std::io::Error) -> Error {
        Error::Storage {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}
