//! Commands executed by the runtime against real collaborators.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyCode;
use tokio::sync::mpsc;

use memorycat::app::{dispatch, Effects};
use memorycat::clipboard::ClipboardSink;
use memorycat::config::Config;
use memorycat::generate::DescriptionGenerator;
use memorycat::store::CommandStore;
use memorycat::tea::{InputKind, Message, Mode, Model};

use crate::fixtures::{key, type_text, TestStore};

fn effects_with(
    store: CommandStore,
    clipboard: ClipboardSink,
) -> (Effects, mpsc::UnboundedReceiver<Message>) {
    let (msg_tx, msg_rx) = mpsc::unbounded_channel();
    let config = Config {
        api_key_env: Some("MEMORYCAT_INTEGRATION_KEY_UNSET".to_string()),
        ..Config::default()
    };
    let effects = Effects {
        store,
        generator: Arc::new(DescriptionGenerator::from_config(&config)),
        clipboard: Arc::new(clipboard),
        msg_tx,
    };
    (effects, msg_rx)
}

async fn next_message(rx: &mut mpsc::UnboundedReceiver<Message>) -> Message {
    tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("timed out waiting for a message")
        .expect("channel closed")
}

#[tokio::test]
async fn test_missing_api_key_falls_back_to_manual_entry() {
    let store = TestStore::new();
    let (effects, mut rx) = effects_with(store.store.clone(), ClipboardSink::new("cat", vec![]));
    let mut model = Model::load(&effects.store);

    dispatch(&mut model, key(KeyCode::Char('n')), &effects);
    type_text(&mut model, "make test");
    dispatch(&mut model, key(KeyCode::Enter), &effects);
    assert_eq!(model.mode, Mode::Generating);

    let msg = next_message(&mut rx).await;
    dispatch(&mut model, msg, &effects);

    assert_eq!(model.mode, Mode::Input(InputKind::Description));
    let error = model.last_error.clone().unwrap();
    assert!(error.contains("MEMORYCAT_INTEGRATION_KEY_UNSET"));

    type_text(&mut model, "run the test suite");
    dispatch(&mut model, key(KeyCode::Enter), &effects);

    let saved = store.store.load().unwrap();
    assert_eq!(saved.commands.len(), 1);
    assert_eq!(saved.commands[0].command, "make test");
    assert_eq!(saved.commands[0].description, "run the test suite");
}

#[cfg(unix)]
#[tokio::test]
async fn test_copy_round_trip_through_clipboard_program() {
    let store = TestStore::with_records(&[("echo {{word}}", "echo a word")]);
    let (effects, mut rx) = effects_with(store.store.clone(), ClipboardSink::new("cat", vec![]));
    let mut model = Model::load(&effects.store);

    dispatch(&mut model, key(KeyCode::Char('c')), &effects);
    type_text(&mut model, "hi");
    dispatch(&mut model, key(KeyCode::Enter), &effects);
    assert!(model.copy_in_flight);

    let msg = next_message(&mut rx).await;
    assert_eq!(msg, Message::Copied);
    dispatch(&mut model, msg, &effects);
    assert!(!model.copy_in_flight);
    assert_eq!(
        model.notification.as_ref().map(|n| n.message.as_str()),
        Some("Copied to clipboard!")
    );
}

#[tokio::test]
async fn test_missing_clipboard_program_reports_failure() {
    let store = TestStore::with_records(&[("ls", "list")]);
    let (effects, mut rx) = effects_with(
        store.store.clone(),
        ClipboardSink::new("memorycat-no-such-clipboard-tool", vec![]),
    );
    let mut model = Model::load(&effects.store);

    dispatch(&mut model, key(KeyCode::Char('c')), &effects);
    let msg = next_message(&mut rx).await;
    assert!(matches!(msg, Message::CopyFailed(_)));

    dispatch(&mut model, msg, &effects);
    assert!(!model.copy_in_flight);
    assert_eq!(model.mode, Mode::List);
}

#[tokio::test]
async fn test_quit_key_ends_session() {
    let store = TestStore::new();
    let (effects, _rx) = effects_with(store.store.clone(), ClipboardSink::new("cat", vec![]));
    let mut model = Model::load(&effects.store);

    assert!(!dispatch(&mut model, key(KeyCode::Char('j')), &effects));
    assert!(dispatch(&mut model, key(KeyCode::Char('q')), &effects));
}
