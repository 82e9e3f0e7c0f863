//! Non-interactive add path.

use std::io::Cursor;

use memorycat::config::Config;
use memorycat::generate::DescriptionGenerator;
use memorycat::headless::{add_command, read_command};
use memorycat::store::CommandRecord;
use memorycat::Error;

use crate::fixtures::TestStore;

#[tokio::test]
async fn test_piped_command_is_described_and_saved() {
    let store = TestStore::with_records(&[("pwd", "print working directory")]);
    let command = read_command(Cursor::new("docker ps -a\n")).unwrap();

    let record = add_command(&command, &store.store, |cmd| async move {
        assert_eq!(cmd, "docker ps -a");
        Ok("list all containers".to_string())
    })
    .await
    .unwrap();

    assert_eq!(record, CommandRecord::new("docker ps -a", "list all containers"));
    let saved = store.store.load().unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved.commands[1], record);
}

#[tokio::test]
async fn test_generation_error_is_fatal() {
    let store = TestStore::with_records(&[("pwd", "print working directory")]);
    let before = store.read_raw();

    let config = Config {
        api_url: Some("http://127.0.0.1:9".to_string()),
        ..Config::default()
    };
    let generator = DescriptionGenerator::from_config(&config).without_api_key();

    let err = add_command("ls", &store.store, |cmd| {
        let generator = &generator;
        async move { generator.generate(&cmd).await }
    })
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Generation(_)));
    assert_eq!(store.read_raw(), before);
}

#[tokio::test]
async fn test_unwritable_store_is_fatal() {
    let store = TestStore::new();
    let blocker = store.temp_dir.path().join("blocker");
    std::fs::write(&blocker, "file, not a directory").unwrap();
    let bad = memorycat::CommandStore::new(blocker.join("commands.json"));

    let err = add_command("ls", &bad, |_| async { Ok("list".to_string()) })
        .await
        .unwrap_err();
    assert!(err.is_storage() || matches!(err, Error::Io(_)));
}

#[test]
fn test_empty_stdin_is_rejected() {
    assert!(matches!(
        read_command(Cursor::new("\n")),
        Err(Error::EmptyCommand)
    ));
}
