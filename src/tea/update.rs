//! Pure update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::store::CommandRecord;
use crate::{mlog, mlog_debug, mlog_warn};

use super::command::Command;
use super::message::Message;
use super::model::{InputKind, Mode, Model, Notification, TemplateFill};

/// Pure update function: Model + Message → Commands
///
/// This function:
/// 1. Takes the current model and an input message
/// 2. Mutates the model state (and sets dirty flag)
/// 3. Returns a list of commands (side effects) to execute
///
/// The function itself has no side effects - all I/O happens via returned Commands.
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return cmds;
            }
            model.notification = None; // Clear notification on any key press
            model.dirty = true; // Keyboard input always triggers render
            match model.mode {
                Mode::List => update_list_mode(model, key, &mut cmds),
                Mode::Generating => {}
                Mode::Input(kind) => update_input_mode(model, key, kind, &mut cmds),
            }
        }

        Message::Paste(text) => {
            if let Mode::Input(_) = model.mode {
                let flattened = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
                model.input_buffer.push_str(&flattened);
                model.dirty = true;
            }
        }

        Message::Resize(_, _) => {
            model.dirty = true; // Resize triggers re-render
        }

        Message::InputClosed(reason) => {
            mlog_warn!("Message::InputClosed reason={}", reason);
            cmds.push(Command::Quit);
        }

        // Command completion callbacks
        Message::DescriptionGenerated {
            command,
            description,
        } => {
            if model.mode != Mode::Generating {
                mlog_warn!("Dropping description for '{}': not generating", command);
                return cmds;
            }
            let command = model.pending_command.take().unwrap_or(command);
            mlog!("Message::DescriptionGenerated command={}", command);
            append_record(model, CommandRecord::new(command, description));
            model.notification = None;
            model.mode = Mode::List;
            cmds.push(Command::Persist);
        }

        Message::DescriptionFailed { command, error } => {
            if model.mode != Mode::Generating {
                mlog_warn!("Dropping generation failure for '{}': not generating", command);
                return cmds;
            }
            mlog_warn!("Message::DescriptionFailed command={} err={}", command, error);
            if model.pending_command.is_none() {
                model.pending_command = Some(command);
            }
            model.last_error = Some(error);
            model.input_buffer.clear();
            model.mode = Mode::Input(InputKind::Description);
            model.dirty = true;
        }

        Message::Copied => {
            mlog_debug!("Message::Copied");
            model.copy_in_flight = false;
            model.notification = Some(Notification::info("Copied to clipboard!"));
            model.dirty = true;
        }

        Message::CopyFailed(err) => {
            mlog_warn!("Message::CopyFailed err={}", err);
            model.copy_in_flight = false;
            model.notification = Some(Notification::error(format!("Failed to copy: {err}")));
            model.dirty = true;
        }

        Message::PersistFailed(err) => {
            mlog_warn!("Message::PersistFailed err={}", err);
            model.last_error = Some(format!("Failed to save commands: {err}"));
            model.dirty = true;
        }
    }

    cmds
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn update_list_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    if is_ctrl_c(&key) {
        cmds.push(Command::Quit);
        return;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if model.selected + 1 < model.storage.len() {
                model.selected += 1;
            }
        }

        KeyCode::Char('k') | KeyCode::Up => {
            model.selected = model.selected.saturating_sub(1);
        }

        KeyCode::Char('n') => {
            model.mode = Mode::Input(InputKind::Command);
            model.input_buffer.clear();
            model.last_error = None;
        }

        KeyCode::Char('c') | KeyCode::Enter => start_copy(model, cmds),

        KeyCode::Char('d') => {
            if model.selected < model.storage.len() {
                let removed = model.storage.commands.remove(model.selected);
                mlog!("Deleted command: {}", removed.command);
                model.selected = model.selected.min(model.storage.len().saturating_sub(1));
                model.last_error = None;
                cmds.push(Command::Persist);
            }
        }

        KeyCode::Char('q') | KeyCode::Esc => {
            cmds.push(Command::Quit);
        }

        KeyCode::Char('?') => {
            model.show_keymap = !model.show_keymap;
        }

        _ => {}
    }
}

/// Copy the selected command, collecting template values first if it has any.
fn start_copy(model: &mut Model, cmds: &mut Vec<Command>) {
    if model.copy_in_flight {
        mlog_debug!("Copy ignored: previous copy still in flight");
        model.notification = Some(Notification::info("Copy already in progress"));
        return;
    }
    let Some(record) = model.selected_record() else {
        return;
    };

    match TemplateFill::for_command(&record.command) {
        Some(fill) => {
            mlog_debug!("Collecting {} template values", fill.variables.len());
            model.template = Some(fill);
            model.input_buffer.clear();
            model.mode = Mode::Input(InputKind::TemplateValue);
        }
        None => {
            let text = record.command.clone();
            model.copy_in_flight = true;
            cmds.push(Command::CopyToClipboard { text });
        }
    }
}

fn update_input_mode(model: &mut Model, key: KeyEvent, kind: InputKind, cmds: &mut Vec<Command>) {
    if is_ctrl_c(&key) {
        cancel_input(model, kind);
        return;
    }

    match key.code {
        KeyCode::Enter => confirm_input(model, kind, cmds),

        KeyCode::Esc => cancel_input(model, kind),

        KeyCode::Backspace => {
            model.input_buffer.pop();
        }

        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            model.input_buffer.push(c);
        }

        _ => {}
    }
}

fn confirm_input(model: &mut Model, kind: InputKind, cmds: &mut Vec<Command>) {
    match kind {
        InputKind::Command => {
            if model.input_buffer.is_empty() {
                return;
            }
            let command = std::mem::take(&mut model.input_buffer);
            mlog_debug!("Requesting description for: {}", command);
            model.pending_command = Some(command.clone());
            model.mode = Mode::Generating;
            cmds.push(Command::GenerateDescription { command });
        }

        InputKind::Description => {
            if model.input_buffer.is_empty() {
                return;
            }
            let description = std::mem::take(&mut model.input_buffer);
            match model.pending_command.take() {
                Some(command) => {
                    mlog!("Saving command with manual description: {}", command);
                    append_record(model, CommandRecord::new(command, description));
                    cmds.push(Command::Persist);
                }
                None => mlog_warn!("Manual description confirmed with no pending command"),
            }
            model.mode = Mode::List;
        }

        InputKind::TemplateValue => {
            let Some(fill) = model.template.as_mut() else {
                mlog_warn!("Template value confirmed with no template in progress");
                model.mode = Mode::List;
                return;
            };
            let value = std::mem::take(&mut model.input_buffer);
            if fill.record(value) {
                let text = fill.preview();
                model.template = None;
                model.mode = Mode::List;
                model.copy_in_flight = true;
                cmds.push(Command::CopyToClipboard { text });
            }
        }
    }
}

fn cancel_input(model: &mut Model, kind: InputKind) {
    model.input_buffer.clear();
    match kind {
        InputKind::Command => {}
        InputKind::TemplateValue => model.template = None,
        InputKind::Description => {
            model.pending_command = None;
            model.last_error = None;
        }
    }
    model.mode = Mode::List;
}

/// Append a record and select it. Persisting is the caller's job.
fn append_record(model: &mut Model, record: CommandRecord) {
    model.storage.commands.push(record);
    model.selected = model.storage.len() - 1;
    model.last_error = None;
    model.dirty = true;
}
