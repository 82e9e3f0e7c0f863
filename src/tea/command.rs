//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - they represent side effects
//! to be executed by the runtime.

/// Output commands from the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask the generator for a description (background task).
    GenerateDescription { command: String },

    /// Send text to the clipboard (background task).
    CopyToClipboard { text: String },

    /// Write the command list to disk before the next event is handled.
    Persist,

    // App lifecycle
    Quit,
}
