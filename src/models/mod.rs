//! Data structures shared across Glassbox
//!
//! This module contains the plain data models used by the sink and the
//! console widgets: leveled log records and console transcript entries.

pub mod log_record;
pub mod transcript;

pub use log_record::{LogLevel, LogRecord};
pub use transcript::{EntryKind, TranscriptEntry};
