//! Session logging: an in-memory stream plus an optional persistent file.
//!
//! Operations receive a [`SessionLog`] as their [`LogSink`]. Every entry is
//! kept in memory (so a host can ask [`SessionLog::has_errors`] before
//! continuing a workflow), forwarded to the `log` facade, and appended to a
//! [`LogFile`] when one is attached.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;

use mamekit_core::{FacadeLog, LogEntry, LogLevel, LogSink, MemoryLog};

/// Append-only log file fed by any number of threads.
///
/// Producers queue lines on a channel; a single writer thread owns the file
/// and writes them in arrival order. ANSI escapes are stripped and each line
/// is timestamped. Dropping the `LogFile` flushes queued lines and joins the
/// writer.
pub struct LogFile {
    path: PathBuf,
    tx: Option<mpsc::Sender<String>>,
    writer: Option<JoinHandle<()>>,
}

impl LogFile {
    /// Open `path` for appending, creating it and its parent directory.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (tx, rx) = mpsc::channel::<String>();

        let writer = std::thread::Builder::new()
            .name("mamekit-log".into())
            .spawn(move || write_lines(file, rx))?;

        Ok(Self {
            path: path.to_path_buf(),
            tx: Some(tx),
            writer: Some(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Queue one entry. Never blocks on disk I/O.
    pub fn append(&self, level: LogLevel, message: &str) {
        let Some(tx) = &self.tx else { return };
        let line = format!(
            "{} [{:<5}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level.as_str(),
            strip_ansi(message)
        );
        // The writer only goes away on drop or after a write error
        let _ = tx.send(line);
    }
}

impl Drop for LogFile {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(writer) = self.writer.take() {
            let _ = writer.join();
        }
    }
}

fn write_lines(file: File, rx: mpsc::Receiver<String>) {
    let mut out = BufWriter::new(file);
    while let Ok(first) = rx.recv() {
        let mut next = Some(first);
        while let Some(line) = next {
            if writeln!(out, "{line}").is_err() {
                return;
            }
            next = rx.try_recv().ok();
        }
        // Queue drained
        if out.flush().is_err() {
            return;
        }
    }
}

fn strip_ansi(message: &str) -> String {
    let stripped = strip_ansi_escapes::strip(message);
    String::from_utf8_lossy(&stripped).into_owned()
}

/// The [`LogSink`] handed to library operations by a host.
pub struct SessionLog {
    memory: MemoryLog,
    file: Option<LogFile>,
    forward: bool,
}

impl SessionLog {
    /// Memory stream plus forwarding to the `log` facade.
    pub fn new() -> Self {
        Self {
            memory: MemoryLog::new(),
            file: None,
            forward: true,
        }
    }

    /// Memory stream only.
    pub fn in_memory() -> Self {
        Self {
            forward: false,
            ..Self::new()
        }
    }

    pub fn with_file(mut self, file: LogFile) -> Self {
        self.file = Some(file);
        self
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file.as_ref().map(LogFile::path)
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.memory.entries()
    }

    /// Whether any error (including exceptions) was logged this session.
    pub fn has_errors(&self) -> bool {
        self.memory.has_errors()
    }

    pub fn error_count(&self) -> usize {
        self.memory.messages(LogLevel::Error).len()
    }

    pub fn warning_count(&self) -> usize {
        self.memory.messages(LogLevel::Warn).len()
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for SessionLog {
    fn log(&self, level: LogLevel, message: &str) {
        self.memory.log(level, message);
        if self.forward {
            FacadeLog.log(level, message);
        }
        if let Some(file) = &self.file {
            file.append(level, message);
        }
    }
}

#[cfg(test)]
#[path = "tests/session_log_tests.rs"]
mod tests;
