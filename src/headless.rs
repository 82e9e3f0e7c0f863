//! Non-interactive add: one command in, one saved record out.
//!
//! Runs the same `update` transitions the interactive session uses, once,
//! and turns every failure into an error instead of a fallback.

use std::future::Future;
use std::io::BufRead;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::store::{CommandRecord, CommandStore};
use crate::tea::{update, Command, InputKind, Message, Mode, Model};
use crate::{mlog, mlog_debug, Error, Result};

/// First line of `reader`, trimmed. Blank input is `EmptyCommand`.
pub fn read_command<R: BufRead>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let command = line.trim();
    if command.is_empty() {
        return Err(Error::EmptyCommand);
    }
    Ok(command.to_string())
}

/// Describe `command` with `describe` and append it to the store.
pub async fn add_command<F, Fut>(
    command: &str,
    store: &CommandStore,
    describe: F,
) -> Result<CommandRecord>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let command = command.trim();
    if command.is_empty() {
        return Err(Error::EmptyCommand);
    }

    // An unreadable document is fatal here; saving over it would lose it.
    let mut model = Model::new(store.load()?);
    model.mode = Mode::Input(InputKind::Command);
    model.input_buffer = command.to_string();

    let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    let cmds = update(&mut model, Message::Key(enter));
    let Some(Command::GenerateDescription { command }) = cmds.into_iter().next() else {
        return Err(Error::EmptyCommand);
    };
    mlog_debug!("headless: generating description for {}", command);

    let description = describe(command.clone()).await?;
    let cmds = update(
        &mut model,
        Message::DescriptionGenerated {
            command,
            description,
        },
    );

    for cmd in cmds {
        if cmd == Command::Persist {
            store.save(&model.storage)?;
        }
    }

    let record = model
        .selected_record()
        .cloned()
        .ok_or_else(|| Error::Generation("no record was added".to_string()))?;
    mlog!("headless: saved {}", record.command);
    Ok(record)
}
