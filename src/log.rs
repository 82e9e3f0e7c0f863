//! File logger. The terminal belongs to the interface, so everything goes to
//! `memorycat.log` in the config directory. Debug lines are kept only with
//! `--debug` or `MEMORYCAT_DEBUG=1`.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        })
    }
}

struct Logger {
    file: Mutex<File>,
    max: Level,
}

impl Logger {
    fn open(path: &Path, debug: bool) -> std::io::Result<Self> {
        Ok(Self {
            file: Mutex::new(File::create(path)?),
            max: if debug { Level::Debug } else { Level::Info },
        })
    }

    fn write(&self, level: Level, msg: &str) {
        if level > self.max {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", line(level, msg));
        }
    }
}

fn line(level: Level, msg: &str) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    format!("[{timestamp}] [{level}] {msg}")
}

fn debug_from_env() -> bool {
    std::env::var("MEMORYCAT_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Start a fresh `dir/memorycat.log`. If the file cannot be created the
/// process runs without a log.
pub fn init_with_debug(dir: &Path, debug: bool) {
    let debug = debug || debug_from_env();
    let _ = std::fs::create_dir_all(dir);
    if let Ok(logger) = Logger::open(&dir.join("memorycat.log"), debug) {
        let _ = LOGGER.set(logger);
    }
}

pub fn is_debug() -> bool {
    LOGGER.get().is_some_and(|l| l.max == Level::Debug)
}

pub fn log_at(level: Level, msg: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.write(level, msg);
    }
}

#[macro_export]
macro_rules! mlog {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::Level::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! mlog_error {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::Level::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! mlog_warn {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::Level::Warn, &format!($($arg)*))
    };
}

/// Dropped unless debug logging is on.
#[macro_export]
macro_rules! mlog_debug {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::Level::Debug, &format!($($arg)*))
    };
}
