//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure session state - no channels, no handles, no runtime infrastructure.

use std::collections::HashMap;

use crate::render::{next_version, PromptView, RenderState};
use crate::store::{CommandRecord, CommandStore, Storage};
use crate::template;
use crate::{mlog_debug, mlog_warn};

/// Level of a notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Error notification - displayed in red with "Error:" prefix
    Error,
    /// Informational notification - displayed in green
    Info,
}

/// A transient status message, cleared by the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Session UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing the command list.
    #[default]
    List,
    /// Waiting on the description generator; keys are ignored.
    Generating,
    /// Composing text into the input buffer.
    Input(InputKind),
}

/// What the input buffer is being composed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A new command to record.
    Command,
    /// The value of the current template variable.
    TemplateValue,
    /// A description typed by hand after generation failed.
    Description,
}

/// Values collected so far for a command being prepared for copy.
///
/// `index < variables.len()` holds for as long as the fill exists; the update
/// loop drops it as soon as the last value is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFill {
    pub command: String,
    pub variables: Vec<String>,
    pub values: HashMap<String, String>,
    pub index: usize,
}

impl TemplateFill {
    /// Start collecting values for `command`, or `None` if it has no placeholders.
    pub fn for_command(command: &str) -> Option<Self> {
        let variables = template::extract_variables(command);
        if variables.is_empty() {
            return None;
        }
        Some(Self {
            command: command.to_string(),
            variables,
            values: HashMap::new(),
            index: 0,
        })
    }

    pub fn current_variable(&self) -> &str {
        &self.variables[self.index]
    }

    /// Store the value for the current variable and advance.
    /// Returns true once every variable has a value.
    pub fn record(&mut self, value: String) -> bool {
        let name = self.variables[self.index].clone();
        self.values.insert(name, value);
        self.index += 1;
        self.index == self.variables.len()
    }

    /// The command with every known value substituted.
    pub fn preview(&self) -> String {
        template::substitute(&self.command, &self.values)
    }
}

/// Pure session state - the single source of truth.
#[derive(Debug, Clone)]
pub struct Model {
    // Core state
    pub storage: Storage,
    pub selected: usize,
    pub mode: Mode,

    // Input state
    pub input_buffer: String,
    pub pending_command: Option<String>,
    pub template: Option<TemplateFill>,

    // Feedback
    pub last_error: Option<String>,
    pub notification: Option<Notification>,

    /// A clipboard copy has been issued and not yet reported back.
    pub copy_in_flight: bool,

    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,
}

impl Model {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            selected: 0,
            mode: Mode::default(),
            input_buffer: String::new(),
            pending_command: None,
            template: None,
            last_error: None,
            notification: None,
            copy_in_flight: false,
            show_keymap: false,
            dirty: true,
        }
    }

    /// Load the model from the store. A failed load starts from an empty
    /// list with the failure shown, so a corrupt file never blocks startup.
    pub fn load(store: &CommandStore) -> Self {
        match store.load() {
            Ok(storage) => {
                mlog_debug!("Model loaded: {} commands", storage.len());
                Self::new(storage)
            }
            Err(e) => {
                mlog_warn!("Starting with empty command list: {}", e);
                let mut model = Self::new(Storage::default());
                model.last_error = Some(format!("{e} (starting with an empty list)"));
                model
            }
        }
    }

    // Accessor methods for UI

    pub fn commands(&self) -> &[CommandRecord] {
        &self.storage.commands
    }

    pub fn selected_record(&self) -> Option<&CommandRecord> {
        self.storage.commands.get(self.selected)
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Each snapshot gets a monotonically increasing version number so the
    /// render thread can skip redundant draws.
    pub fn snapshot(&self) -> RenderState {
        let prompt = self.template.as_ref().map(|fill| PromptView {
            variable: fill.current_variable().to_string(),
            position: fill.index + 1,
            total: fill.variables.len(),
            preview: fill.preview(),
        });

        RenderState {
            version: next_version(),
            commands: self.storage.commands.clone(),
            selected: self.selected,
            mode: self.mode,
            input_buffer: self.input_buffer.clone(),
            pending_command: self.pending_command.clone(),
            prompt,
            last_error: self.last_error.clone(),
            notification: self.notification.clone(),
            show_keymap: self.show_keymap,
        }
    }
}
