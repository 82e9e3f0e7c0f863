//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function - they come from the terminal
//! input actor or from background tasks reporting completion. All of them
//! share one ordered queue.

use crossterm::event::KeyEvent;

/// Input messages to the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    /// Bracketed paste
    Paste(String),
    Resize(u16, u16),
    /// The terminal stopped delivering events; nothing else can quit.
    InputClosed(String),

    // Command completion callbacks
    DescriptionGenerated {
        command: String,
        description: String,
    },
    DescriptionFailed {
        command: String,
        error: String,
    },
    Copied,
    CopyFailed(String),

    /// Synchronous save after a list mutation failed.
    PersistFailed(String),
}
