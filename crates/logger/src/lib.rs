//! Diagnostics logging for wisteria.
//!
//! Provides a simple, thread-safe log with in-memory storage and optional
//! file output. Unlike a process-global logger, a [`Logger`] is an
//! injectable handle: components receive a clone, and tests can read the
//! recorded entries back instead of capturing console output. Events such
//! as "contrast pair skipped" or "storage fallback engaged" are therefore
//! assertable.

use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

#[derive(Debug)]
struct Inner {
    /// Recorded entries (last N messages)
    entries: VecDeque<LogEntry>,
    /// Maximum number of entries kept in memory
    max_entries: usize,
    /// Minimum log level to record
    min_level: LogLevel,
    /// Optional log file path
    file_path: Option<PathBuf>,
}

impl Inner {
    fn add_entry(&mut self, level: LogLevel, message: String) {
        // Filter by minimum level
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.entries.push_back(LogEntry {
            timestamp: timestamp.clone(),
            level,
            message: message.clone(),
        });

        // Limit queue size
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }

        // Write to file (create if deleted)
        if let Some(path) = &self.file_path {
            if let Ok(mut file) = OpenOptions::new().append(true).create(true).open(path) {
                let _ = writeln!(file, "[{}] {}: {}", timestamp, level.to_str(), message);
            }
        }
    }
}

/// Cloneable logging handle; clones share the same entry buffer.
#[derive(Debug, Clone)]
pub struct Logger {
    inner: Arc<Mutex<Inner>>,
}

impl Logger {
    /// Create an in-memory logger keeping at most `max_entries` messages at
    /// or above `min_level`.
    pub fn new(max_entries: usize, min_level: LogLevel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: VecDeque::new(),
                max_entries,
                min_level,
                file_path: None,
            })),
        }
    }

    /// Additionally mirror entries to a log file, truncated on creation.
    pub fn with_file(self, file_path: PathBuf) -> Self {
        if let Some(parent) = file_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        // Clear log file on startup
        if let Ok(mut file) = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
        {
            let _ = writeln!(file, "=== Wisteria Log Start ===");
        }

        if let Ok(mut inner) = self.inner.lock() {
            inner.file_path = Some(file_path);
        }
        self
    }

    /// Set minimum log level dynamically
    pub fn set_min_level(&self, level: LogLevel) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.min_level = level;
        }
    }

    /// Log a debug message
    pub fn debug(&self, message: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.add_entry(LogLevel::Debug, message.into());
        }
    }

    /// Log an informational message
    pub fn info(&self, message: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.add_entry(LogLevel::Info, message.into());
        }
    }

    /// Log a warning message
    pub fn warn(&self, message: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.add_entry(LogLevel::Warn, message.into());
        }
    }

    /// Log an error message
    pub fn error(&self, message: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.add_entry(LogLevel::Error, message.into());
        }
    }

    /// Get all recorded entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        if let Ok(inner) = self.inner.lock() {
            inner.entries.iter().cloned().collect()
        } else {
            Vec::new()
        }
    }
}

impl Default for Logger {
    /// In-memory logger with 200 entries at `Info` and above.
    fn default() -> Self {
        Self::new(200, LogLevel::Info)
    }
}
