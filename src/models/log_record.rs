//! Log Record Model
//!
//! A single leveled message emitted into a log sink. Records are display
//! data for the current session only; they are never persisted.

use chrono::{DateTime, Local};

/// Severity label attached to a log record.
///
/// Levels carry no ordering and nothing in the crate filters on them:
/// every record a sink receives is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
    Warning,
    Error,
}

impl LogLevel {
    /// Short uppercase tag used by the log panel ("INFO", "WARN", ...)
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Lowercase name as used by the script surface (`log.info`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single record in a log sink
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Severity label
    pub level: LogLevel,

    /// Message text, rendered verbatim
    pub message: String,

    /// When the record was emitted (local time)
    pub timestamp: DateTime<Local>,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }
}
