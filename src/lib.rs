pub mod clipboard;
pub mod config;
pub mod error;
pub mod generate;
pub mod headless;
pub mod log;
pub mod store;
pub mod template;

// Decoupled game loop architecture
pub mod actors;
pub mod app;
pub mod render;
pub mod tea;
pub mod ui;

pub use error::{Error, Result};
pub use store::{CommandRecord, CommandStore, Storage};
