//! Error types and Result aliases for Glassbox

use std::fmt;
use std::path::PathBuf;

/// Result type alias for Glassbox operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Glassbox
#[derive(Debug)]
pub enum Error {
    // === Script errors ===
    /// Lexing failed on injected text
    ScanFailed {
        line: usize,
        column: usize,
        reason: String,
    },

    /// Parsing failed on injected text
    ParseFailed {
        line: usize,
        reason: String,
    },

    /// Evaluation failed at runtime
    EvalFailed {
        reason: String,
    },

    /// A name was not resolvable in the bound scope
    UnknownName {
        name: String,
    },

    /// A host command was called with the wrong number of positional arguments
    ArityMismatch {
        command: String,
        expected: String,
        got: usize,
    },

    /// A host command was called with a keyword argument it does not accept
    KeywordMismatch {
        command: String,
        keyword: String,
    },

    /// A value was called that is not callable
    NotCallable {
        type_name: &'static str,
    },

    /// An attribute was read from or written to a non-table value
    NotATable {
        type_name: &'static str,
    },

    /// An instance scope was requested that does not exist
    ScopeNotFound {
        name: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Script errors
            Error::ScanFailed {
                line,
                column,
                reason,
            } => {
                write!(f, "scan error at {}:{}: {}", line, column, reason)
            }
            Error::ParseFailed { line, reason } => {
                write!(f, "parse error at line {}: {}", line, reason)
            }
            Error::EvalFailed { reason } => {
                write!(f, "evaluation error: {}", reason)
            }
            Error::UnknownName { name } => {
                write!(f, "name '{}' is not defined in the bound scope", name)
            }
            Error::ArityMismatch {
                command,
                expected,
                got,
            } => {
                write!(
                    f,
                    "'{}' expects {} positional argument(s), got {}",
                    command, expected, got
                )
            }
            Error::KeywordMismatch { command, keyword } => {
                write!(f, "'{}' does not accept keyword '{}'", command, keyword)
            }
            Error::NotCallable { type_name } => {
                write!(f, "value of type {} is not callable", type_name)
            }
            Error::NotATable { type_name } => {
                write!(f, "value of type {} has no attributes", type_name)
            }
            Error::ScopeNotFound { name } => {
                write!(f, "instance scope '{}' does not exist", name)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(
                    f,
                    "failed to load config from '{}': {}",
                    path.display(),
                    reason
                )
            }
            Error::ConfigNotFound => {
                write!(f, "configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(
                    f,
                    "configuration validation failed for '{}': {}",
                    field, reason
                )
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
