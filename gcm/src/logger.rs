//! A file-backed logger: writes to a fixed file instead of a stream,
//! since the TTY renderer owns the terminal for the duration of a run
//! and log lines interleaved with the redraw would corrupt it.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::prelude::*;
use log::{Level, Log, Metadata, Record};

pub const LOG_FILE_NAME: &str = "gcm.log";

pub struct FileLogger {
    level: Level,
    file: Mutex<File>,
}

impl FileLogger {
    pub fn open(path: &Path, level: Level) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }

    /// Installs this logger as the global `log` backend. Must be called at
    /// most once per process.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level.to_level_filter());
        Ok(())
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "{} {:<5} {:<10} {}",
            Local::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            record.level(),
            record.target(),
            record.args(),
        );
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// The level implied by `-verbose`: `Debug` when set, `Info` otherwise.
/// `RUST_LOG`, when set, always takes precedence.
pub fn level_for(verbose: bool) -> Level {
    env_level().unwrap_or(if verbose { Level::Debug } else { Level::Info })
}

fn env_level() -> Option<Level> {
    std::env::var("RUST_LOG").ok()?.parse().ok()
}

/// Resolves the log file to an absolute path in the current directory.
pub fn log_file_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}
