//! Configuration management for Glassbox
//!
//! TOML-backed configuration for the developer kit and the demo host:
//! window/font settings, console scope binding, and logging options.
//! Every field has a default so a partial (or absent) config file works.

pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// Main configuration structure for Glassbox
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI configuration
    pub ui: UiConfig,

    /// Evaluation console configuration
    pub console: ConsoleConfig,

    /// Log sink configuration
    pub logging: LoggingConfig,
}

/// UI-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Font size in points for console and log text
    pub font_size: u32,

    /// Initial window width
    pub window_width: f32,

    /// Initial window height
    pub window_height: f32,

    /// Use the dark visuals
    pub dark_mode: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_size: 13,
            window_width: 960.0,
            window_height: 640.0,
            dark_mode: true,
        }
    }
}

/// Evaluation console configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Scope the console binds to at construction: "module" for the
    /// global environment, any other value names an instance environment
    /// reachable through `self`. The binding is fixed for the lifetime
    /// of the console.
    pub scope: String,

    /// Show the console window when the kit first opens
    pub open_on_start: bool,

    /// Notice shown at the top of a fresh transcript
    pub greeting: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            scope: "module".to_string(),
            open_on_start: true,
            greeting: "Ctrl+Enter evaluates the buffer. Type 'help' for console commands."
                .to_string(),
        }
    }
}

/// Log sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Name of the session sink
    pub sink_name: String,

    /// Render record timestamps in the log panel
    pub show_timestamps: bool,

    /// Default tracing filter when RUST_LOG is not set
    pub internal_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            sink_name: "session".to_string(),
            show_timestamps: true,
            internal_filter: "info".to_string(),
        }
    }
}

/// Validation failure for a configuration value
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("font size {0} is out of range (6..=72)")]
    FontSize(u32),

    #[error("window dimensions {0}x{1} are below the 320x240 minimum")]
    WindowSize(f32, f32),

    #[error("sink name cannot be empty")]
    EmptySinkName,

    #[error("console scope cannot be empty")]
    EmptyScope,
}

impl Config {
    /// Check the configuration for out-of-range values
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(6..=72).contains(&self.ui.font_size) {
            return Err(ValidationError::FontSize(self.ui.font_size));
        }
        if self.ui.window_width < 320.0 || self.ui.window_height < 240.0 {
            return Err(ValidationError::WindowSize(
                self.ui.window_width,
                self.ui.window_height,
            ));
        }
        if self.logging.sink_name.trim().is_empty() {
            return Err(ValidationError::EmptySinkName);
        }
        if self.console.scope.trim().is_empty() {
            return Err(ValidationError::EmptyScope);
        }
        Ok(())
    }
}
