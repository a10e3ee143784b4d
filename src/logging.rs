//! File log sink for the `log` facade.
//!
//! Appends `LEVEL target: message` lines to `typecase_debug.log` next to the
//! running executable. The library only emits through `log` macros; binaries
//! opt in with [`init`].

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{LevelFilter, Log, Metadata, Record};

/// Default log file location: beside the executable, or the working
/// directory if the executable path is unknown.
pub fn log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typecase_debug.log")
}

/// Parse a level name, falling back to `Warn` for anything unrecognized.
pub fn parse_level(s: &str) -> LevelFilter {
    s.trim().parse().unwrap_or(LevelFilter::Warn)
}

/// `log::Log` implementation that appends to a file.
pub struct FileLogger {
    path: PathBuf,
    level: LevelFilter,
}

impl FileLogger {
    pub fn new(path: PathBuf, level: LevelFilter) -> Self {
        Self { path, level }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One log line, without the trailing newline.
    pub fn format(record: &Record<'_>) -> String {
        format!("{:<5} {}: {}", record.level(), record.target(), record.args())
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        // Logging must never fail the caller.
        let _ = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| writeln!(f, "{line}"));
    }

    fn flush(&self) {}
}

/// Install a [`FileLogger`] at [`log_path`] as the global logger.
///
/// Returns `false` if a logger was already installed.
pub fn init(level: LevelFilter) -> bool {
    let logger = FileLogger::new(log_path(), level);
    if log::set_boxed_logger(Box::new(logger)).is_err() {
        return false;
    }
    log::set_max_level(level);
    true
}
