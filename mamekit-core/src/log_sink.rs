//! Log sink contract for pipeline operations.
//!
//! Operations report recovered problems (a malformed input file, a failed
//! copy) and fatal ones through a [`LogSink`] passed in by the caller. Error
//! entries are kept distinct from informational ones so a host can decide
//! whether to halt a larger workflow.

use std::fmt;
use std::sync::Mutex;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn is_error(self) -> bool {
        self == LogLevel::Error
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Receives log events from pipeline operations.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Log an error together with what was being attempted.
    fn exception(&self, err: &dyn std::error::Error, context: &str) {
        self.log(LogLevel::Error, &format_exception(err, context));
    }
}

/// Render `context: error (caused by: …)` including the full source chain.
pub fn format_exception(err: &dyn std::error::Error, context: &str) -> String {
    let mut message = format!("{context}: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(" (caused by: {cause})"));
        source = cause.source();
    }
    message
}

/// Collects entries in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Messages logged at exactly `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(|e| e.level.is_error())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LogSink for MemoryLog {
    fn log(&self, level: LogLevel, message: &str) {
        self.lock().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

/// Forwards entries to the `log` facade.
pub struct FacadeLog;

impl LogSink for FacadeLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => log::info!("{message}"),
            LogLevel::Warn => log::warn!("{message}"),
            LogLevel::Error => log::error!("{message}"),
        }
    }
}
