//! Console Transcript Model
//!
//! The transcript is the console's display history: everything the user
//! typed and everything evaluation produced, in order. It is display
//! state only — evaluation never consults it, and clearing it does not
//! touch the command buffer or any scope.

use chrono::{DateTime, Local};
use uuid::Uuid;

/// What kind of line a transcript entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Echo of submitted input
    Input,
    /// Output printed during evaluation
    Output,
    /// The final value of an evaluation
    Result,
    /// An evaluation error
    Error,
    /// Console-generated notice (help text, greetings)
    Notice,
}

/// A single line in the console transcript
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    /// Unique identifier for the entry
    pub id: String,

    /// Entry kind, drives the prefix and color
    pub kind: EntryKind,

    /// Text content; may span multiple lines for Input entries
    pub text: String,

    /// When the entry was appended (local time)
    pub timestamp: DateTime<Local>,
}

impl TranscriptEntry {
    pub fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn input(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Input, text)
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Output, text)
    }

    pub fn result(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Result, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Error, text)
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Notice, text)
    }

    /// Prefix shown before the entry text in the transcript
    pub fn prefix(&self) -> &'static str {
        match self.kind {
            EntryKind::Input => ">> ",
            EntryKind::Result => "= ",
            _ => "",
        }
    }
}
