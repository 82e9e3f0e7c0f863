//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Temporary command stores
//! - Key and text input messages
//! - Seeded models

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use memorycat::store::{CommandRecord, CommandStore, Storage};
use memorycat::tea::{update, Command, Message, Model};

/// A command store living in its own temporary directory.
pub struct TestStore {
    /// Keeps the directory alive for the life of the test.
    pub temp_dir: TempDir,
    pub store: CommandStore,
}

impl TestStore {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CommandStore::new(temp_dir.path().join("commands.json"));
        Self { temp_dir, store }
    }

    /// A store pre-populated with `records` (command, description).
    pub fn with_records(records: &[(&str, &str)]) -> Self {
        let test_store = Self::new();
        test_store
            .store
            .save(&storage_of(records))
            .expect("Failed to seed store");
        test_store
    }

    pub fn write_raw(&self, contents: &str) {
        std::fs::write(self.store.path(), contents).expect("Failed to write store file");
    }

    pub fn read_raw(&self) -> String {
        std::fs::read_to_string(self.store.path()).expect("Failed to read store file")
    }
}

pub fn storage_of(records: &[(&str, &str)]) -> Storage {
    Storage {
        commands: records
            .iter()
            .map(|(c, d)| CommandRecord::new(*c, *d))
            .collect(),
    }
}

pub fn model_of(records: &[(&str, &str)]) -> Model {
    Model::new(storage_of(records))
}

pub fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ctrl_c() -> Message {
    Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

/// Type `text` one key at a time, collecting any commands produced.
pub fn type_text(model: &mut Model, text: &str) -> Vec<Command> {
    let mut cmds = Vec::new();
    for c in text.chars() {
        cmds.extend(update(model, key(KeyCode::Char(c))));
    }
    cmds
}
