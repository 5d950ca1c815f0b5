#![deny(missing_docs)]
//! Shared logging utilities for the jukebox workspace.
//!
//! This crate provides the `jukebox_*` logging macros used across the
//! codebase, logger initialization for the binary and for tests, and the
//! [`Diagnostics`] hook through which the engine reports notable events.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[doc(hidden)]
pub use log;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! jukebox_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! jukebox_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! jukebox_info {
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! jukebox_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! jukebox_error {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncating it.
    File(std::path::PathBuf),
    /// Write to terminal (stdout/stderr).
    Terminal,
    /// Write to both file and terminal.
    Both(std::path::PathBuf),
}

/// Initialize the global logger with the specified destination.
///
/// Falls back to terminal-only output if the log file cannot be created.
/// Safe to call more than once; later calls are ignored.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File(path) => match create_file_logger(&path, level, config.clone()) {
            Some(file_logger) => vec![file_logger],
            None => vec![term_logger(level, config)],
        },
        LogDestination::Terminal => vec![term_logger(level, config)],
        LogDestination::Both(path) => {
            let mut loggers = vec![term_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(&path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![term_logger(level, Config::default())]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn term_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => {
            let logger: Box<dyn SharedLogger> = WriteLogger::new(level, config, file);
            Some(logger)
        }
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Expected but noteworthy, e.g. a protocol upgrade.
    Info,
    /// A failure that was reported to the user or swallowed.
    Error,
}

/// A structured diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub level: DiagnosticLevel,
    /// Stable event name, e.g. `protocol_upgrade`.
    pub event: &'static str,
    /// Free-form human readable detail.
    pub detail: String,
}

/// Receiver for diagnostic events.
///
/// Components take an `Arc<dyn Diagnostics>` so hosts can route events to
/// the log facade while tests record and assert on them.
pub trait Diagnostics: Send + Sync {
    /// Handle one event.
    fn emit(&self, diagnostic: Diagnostic);

    /// Emit an info-level event.
    fn info(&self, event: &'static str, detail: String) {
        self.emit(Diagnostic {
            level: DiagnosticLevel::Info,
            event,
            detail,
        });
    }

    /// Emit an error-level event.
    fn error(&self, event: &'static str, detail: String) {
        self.emit(Diagnostic {
            level: DiagnosticLevel::Error,
            event,
            detail,
        });
    }
}

/// Forwards diagnostics to the global log facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Info => jukebox_info!("{}: {}", diagnostic.event, diagnostic.detail),
            DiagnosticLevel::Error => {
                jukebox_error!("{}: {}", diagnostic.event, diagnostic.detail)
            }
        }
    }
}

/// Records diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns the event names recorded so far, in order.
    pub fn events(&self) -> Vec<&'static str> {
        self.records().into_iter().map(|d| d.event).collect()
    }

    /// Counts how many times `event` was emitted.
    pub fn count(&self, event: &str) -> usize {
        self.records().iter().filter(|d| d.event == event).count()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        match self.records.lock() {
            Ok(mut records) => records.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_diagnostics_records_in_order() {
        let diagnostics = MemoryDiagnostics::new();
        diagnostics.info("protocol_upgrade", "https://box".to_string());
        diagnostics.error("submission_failed", "boom".to_string());

        assert_eq!(
            diagnostics.events(),
            vec!["protocol_upgrade", "submission_failed"]
        );
        assert_eq!(diagnostics.records()[1].level, DiagnosticLevel::Error);
        assert_eq!(diagnostics.count("protocol_upgrade"), 1);
    }

    #[test]
    fn log_diagnostics_does_not_panic_without_logger() {
        LogDiagnostics.info("protocol_fallback", "retrying".to_string());
    }
}
