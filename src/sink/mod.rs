//! Session log sink
//!
//! A sink is a named, append-only, ordered sequence of leveled records
//! that a log panel renders. Records accumulate for the process lifetime:
//! there is no size bound, no rotation, and no persistence. Nothing
//! filters on level — every record a sink receives is rendered.
//!
//! Sinks are shared by `Rc<RefCell<…>>` handles between the developer
//! kit, the engine's `log.*` commands, and the call-tracing wrappers.
//! Everything runs on the single UI thread, so no locking is involved.

pub mod wrap;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::models::{LogLevel, LogRecord};

/// Shared handle to a sink
pub type SinkHandle = Rc<RefCell<LogSink>>;

/// A named, append-only log record sequence
#[derive(Debug)]
pub struct LogSink {
    name: String,
    records: Vec<LogRecord>,
}

impl LogSink {
    /// Create an empty sink
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Create an empty sink behind a shared handle
    pub fn shared(name: impl Into<String>) -> SinkHandle {
        Rc::new(RefCell::new(Self::new(name)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a record. Records are never reordered, dropped, or
    /// deduplicated; N emits yield N records in call order.
    pub fn emit(&mut self, level: LogLevel, message: impl Into<String>) {
        let record = LogRecord::new(level, message);
        trace!(sink = %self.name, level = %record.level, "{}", record.message);
        self.records.push(record);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.emit(LogLevel::Info, message);
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.emit(LogLevel::Debug, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.emit(LogLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.emit(LogLevel::Error, message);
    }

    /// All records, oldest first
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records. This is an explicit user action wired to the log
    /// panel's Clear button, not a retention policy.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
