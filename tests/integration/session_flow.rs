//! Interactive session scenarios driven through `update` and the render
//! projection, with persistence checked against a real store.

use crossterm::event::KeyCode;

use memorycat::render::project;
use memorycat::store::CommandRecord;
use memorycat::tea::{update, Command, InputKind, Message, Mode, Model};

use crate::fixtures::{ctrl_c, key, model_of, type_text, TestStore};

/// Apply `Persist` commands the way the runtime does.
fn persist_all(model: &Model, cmds: &[Command], store: &TestStore) {
    for cmd in cmds {
        if *cmd == Command::Persist {
            store.store.save(&model.storage).unwrap();
        }
    }
}

#[test]
fn test_copy_literal_command_stays_listing() {
    let mut model = model_of(&[("git status", "show working tree status")]);

    let cmds = update(&mut model, key(KeyCode::Char('c')));

    assert_eq!(
        cmds,
        vec![Command::CopyToClipboard {
            text: "git status".to_string()
        }]
    );
    assert_eq!(model.mode, Mode::List);
}

#[test]
fn test_add_template_command_then_copy_with_values() {
    let store = TestStore::new();
    let mut model = Model::load(&store.store);

    update(&mut model, key(KeyCode::Char('n')));
    assert_eq!(model.mode, Mode::Input(InputKind::Command));
    type_text(&mut model, "ssh {{user}}@{{host}}");
    let cmds = update(&mut model, key(KeyCode::Enter));
    assert_eq!(
        cmds,
        vec![Command::GenerateDescription {
            command: "ssh {{user}}@{{host}}".to_string()
        }]
    );
    assert!(project(&model.snapshot()).contains("Generating description..."));

    let cmds = update(
        &mut model,
        Message::DescriptionGenerated {
            command: "ssh {{user}}@{{host}}".to_string(),
            description: "ssh into a host".to_string(),
        },
    );
    persist_all(&model, &cmds, &store);
    assert_eq!(model.mode, Mode::List);
    assert_eq!(model.selected, 0);

    update(&mut model, key(KeyCode::Char('c')));
    assert_eq!(model.mode, Mode::Input(InputKind::TemplateValue));
    assert!(project(&model.snapshot()).contains("Enter value for: user (1/2)"));

    type_text(&mut model, "bob");
    assert!(update(&mut model, key(KeyCode::Enter)).is_empty());
    assert!(project(&model.snapshot()).contains("Preview: ssh bob@{{host}}"));

    type_text(&mut model, "srv");
    let cmds = update(&mut model, key(KeyCode::Enter));
    assert_eq!(
        cmds,
        vec![Command::CopyToClipboard {
            text: "ssh bob@srv".to_string()
        }]
    );
    assert_eq!(model.mode, Mode::List);
    assert!(model.template.is_none());

    let saved = store.store.load().unwrap();
    assert_eq!(
        saved.commands,
        vec![CommandRecord::new("ssh {{user}}@{{host}}", "ssh into a host")]
    );
}

#[test]
fn test_generation_failure_then_manual_description() {
    let store = TestStore::new();
    let mut model = Model::load(&store.store);

    update(&mut model, key(KeyCode::Char('n')));
    type_text(&mut model, "kubectl get pods");
    update(&mut model, key(KeyCode::Enter));
    update(
        &mut model,
        Message::DescriptionFailed {
            command: "kubectl get pods".to_string(),
            error: "Description generation failed: offline".to_string(),
        },
    );

    assert_eq!(model.mode, Mode::Input(InputKind::Description));
    assert_eq!(model.pending_command.as_deref(), Some("kubectl get pods"));
    let text = project(&model.snapshot());
    assert!(text.contains("Please enter a description manually:"));

    type_text(&mut model, "list pods");
    let cmds = update(&mut model, key(KeyCode::Enter));
    persist_all(&model, &cmds, &store);

    assert_eq!(model.mode, Mode::List);
    assert!(model.last_error.is_none());
    assert_eq!(
        store.store.load().unwrap().commands,
        vec![CommandRecord::new("kubectl get pods", "list pods")]
    );
}

#[test]
fn test_empty_confirmations_store_empty_values() {
    let mut model = model_of(&[("echo {{a}} {{b}} {{a}}", "echo")]);

    update(&mut model, key(KeyCode::Enter));
    assert_eq!(model.mode, Mode::Input(InputKind::TemplateValue));

    assert!(update(&mut model, key(KeyCode::Enter)).is_empty());
    let cmds = update(&mut model, key(KeyCode::Enter));
    assert_eq!(
        cmds,
        vec![Command::CopyToClipboard {
            text: "echo   ".to_string()
        }]
    );
}

#[test]
fn test_navigation_and_delete_persist() {
    let store = TestStore::with_records(&[("a", "1"), ("b", "2"), ("c", "3")]);
    let mut model = Model::load(&store.store);

    for _ in 0..10 {
        update(&mut model, key(KeyCode::Down));
    }
    assert_eq!(model.selected, 2);

    let cmds = update(&mut model, key(KeyCode::Char('d')));
    persist_all(&model, &cmds, &store);
    assert_eq!(model.selected, 1);

    for _ in 0..10 {
        update(&mut model, key(KeyCode::Char('k')));
    }
    assert_eq!(model.selected, 0);

    let saved = store.store.load().unwrap();
    let names: Vec<_> = saved.commands.iter().map(|r| r.command.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_empty_list_copy_and_delete_are_noops() {
    let mut model = model_of(&[]);
    assert!(update(&mut model, key(KeyCode::Char('c'))).is_empty());
    assert!(update(&mut model, key(KeyCode::Char('d'))).is_empty());
    assert_eq!(model.selected, 0);
    assert!(project(&model.snapshot()).contains("No commands saved yet"));
}

#[test]
fn test_corrupt_store_starts_empty_and_keeps_file() {
    let store = TestStore::new();
    store.write_raw("{ this is not json");

    let model = Model::load(&store.store);

    assert!(model.commands().is_empty());
    let warning = model.last_error.clone().unwrap();
    assert!(warning.contains("starting with an empty list"));
    assert_eq!(store.read_raw(), "{ this is not json");
}

#[test]
fn test_copy_result_notifications() {
    let mut model = model_of(&[("ls", "list")]);

    update(&mut model, key(KeyCode::Char('c')));
    update(&mut model, Message::Copied);
    assert!(project(&model.snapshot()).contains("Copied to clipboard!"));

    update(&mut model, key(KeyCode::Char('c')));
    update(&mut model, Message::CopyFailed("xclip not found".to_string()));
    assert!(project(&model.snapshot()).contains("Error: Failed to copy: xclip not found"));
}

#[test]
fn test_ctrl_c_cancels_input_then_quits() {
    let mut model = model_of(&[]);

    update(&mut model, key(KeyCode::Char('n')));
    type_text(&mut model, "half typed");
    assert!(update(&mut model, ctrl_c()).is_empty());
    assert_eq!(model.mode, Mode::List);
    assert!(model.input_buffer.is_empty());

    assert_eq!(update(&mut model, ctrl_c()), vec![Command::Quit]);
}

#[test]
fn test_pasted_command_is_flattened() {
    let mut model = model_of(&[]);

    update(&mut model, key(KeyCode::Char('n')));
    update(&mut model, Message::Paste("docker ps\n-a".to_string()));
    let cmds = update(&mut model, key(KeyCode::Enter));

    assert_eq!(
        cmds,
        vec![Command::GenerateDescription {
            command: "docker ps -a".to_string()
        }]
    );
}
