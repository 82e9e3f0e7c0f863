//! Clipboard sink: pipes text into the platform's copy program.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::Config;
use crate::{mlog_debug, Error, Result};

const COPY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSink {
    program: String,
    args: Vec<String>,
}

impl ClipboardSink {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a configured command line like `xclip -selection clipboard`.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn from_config(config: &Config) -> Self {
        config
            .clipboard_command
            .as_deref()
            .and_then(Self::parse)
            .unwrap_or_else(Self::detect)
    }

    /// Platform default copy program.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", vec![])
        } else if cfg!(target_os = "windows") {
            Self::new("clip", vec![])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", vec![])
        } else {
            Self::new(
                "xclip",
                vec!["-selection".to_string(), "clipboard".to_string()],
            )
        }
    }

    pub fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    fn resolve(&self) -> Result<PathBuf> {
        which::which(&self.program)
            .map_err(|_| Error::Copy(format!("{} not found", self.program)))
    }

    /// Write `text` to the program's stdin and wait for it to exit.
    ///
    /// Output is discarded: xclip and wl-copy fork a child that keeps the
    /// selection alive and would hold any inherited pipe open.
    pub async fn copy(&self, text: &str) -> Result<()> {
        let binary = self.resolve()?;
        mlog_debug!("clipboard: {} ({} bytes)", self.describe(), text.len());

        let mut child = Command::new(binary)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Copy(format!("failed to start {}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| Error::Copy(e.to_string()))?;
            // Dropping stdin closes the pipe so the program sees EOF.
        }

        let status = tokio::time::timeout(COPY_TIMEOUT, child.wait())
            .await
            .map_err(|_| {
                Error::Copy(format!(
                    "{} did not exit within {}s",
                    self.program,
                    COPY_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| Error::Copy(e.to_string()))?;

        if !status.success() {
            return Err(Error::Copy(format!("{} exited with {}", self.program, status)));
        }
        Ok(())
    }
}
