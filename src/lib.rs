//! Glassbox - an embeddable live developer console for egui applications
//!
//! Glassbox bolts a live command-evaluation console onto a running
//! eframe/egui application: type a scriptlet into a text window, hit
//! Ctrl+Enter, and it evaluates inside the live process against a chosen
//! scope. A session log window and a debug window round out the kit.
//!
//! ## Features
//!
//! - **Evaluation console:** Multi-line command buffer with a transcript;
//!   Ctrl+Enter evaluates, Enter inserts a newline
//! - **Embedded scriptlet engine:** Lexer, parser, and tree-walking
//!   evaluator implemented in-crate; injected text reaches only the bound
//!   scope and explicitly registered host commands
//! - **Session log sink:** Named, append-only, leveled records rendered in
//!   a scrollable window; no filtering, no retention policy
//! - **Call tracing:** Wrap host commands or plain Rust functions so their
//!   arguments and return values are mirrored into the log
//! - **Debug window:** Live view of globals, instance scopes, registered
//!   commands, and evaluation statistics
//! - **Configuration:** TOML-based configuration files
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`script`] - The scriptlet engine: values, scopes, lexer, parser,
//!   evaluator, host-command registry
//! - [`sink`] - Session log sink and call-tracing wrappers
//! - [`devkit`] - The developer kit bundle (engine + sink + windows)
//! - [`config`] - Configuration loading and validation
//! - [`models`] - Data structures (LogRecord, TranscriptEntry)
//! - [`mod@error`] - Error types and Result aliases
//!
//! ### UI Components
//!
//! - [`ui`] - Rendering components (console, log panel, debug panel)
//!
//! ## Quick Start
//!
//! ```no_run
//! use glassbox::{init, DevKit};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from default locations (falls back to defaults)
//! let config = init()?;
//!
//! // Construct the kit and hold it in your eframe::App
//! let mut kit = DevKit::new(&config);
//!
//! // In your update(): kit.show(ctx);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Everything runs single-threaded on the egui update loop: the console
//! callback, engine evaluation, and sink emission execute synchronously
//! with no suspension points. A long-running scriptlet blocks the UI; that
//! is an inherent property of the pattern. Shared state uses
//! `Rc<RefCell<…>>` handles since nothing crosses a thread boundary.
//!
//! ## Safety and Reliability
//!
//! - **No Panics:** All fallible operations return `Result`
//! - **Fail Loud, Keep Running:** An evaluation error becomes a transcript
//!   entry; the event loop and the engine stay fully usable
//! - **Capability-Limited Surface:** Injected text can only reach bound
//!   scope variables and registered host commands; there is no ambient
//!   process or filesystem access
//! - **Trusted Local Use:** The console performs no sandboxing, input
//!   validation, or permission checks beyond the capability surface; it is
//!   a development tool, not a production feature

pub mod config;
pub mod devkit;
pub mod error;
pub mod models;
pub mod script;
pub mod sink;
pub mod ui;

// Re-exports for core functionality
pub use config::{Config, ConfigLoader};
pub use devkit::DevKit;
pub use error::{Error, Result};
pub use script::{Engine, EvalScope, Evaluation, HostCommand, Value};
pub use sink::{LogSink, SinkHandle};

// Convenience re-exports for common types
pub use models::{LogLevel, LogRecord};
pub use ui::{ConsolePanel, DebugPanel, LogPanel};

use tracing::{info, warn};

// Version information
/// The current version of Glassbox from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The crate description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize Glassbox with default settings
///
/// Loads configuration from the default search locations (see
/// [`ConfigLoader::search_paths`]) and falls back to built-in defaults
/// when no file is found or the file fails to load.
///
/// # Examples
///
/// ```no_run
/// use glassbox::init;
///
/// match init() {
///     Ok(config) => println!("console scope: {}", config.console.scope),
///     Err(e) => eprintln!("initialization failed: {}", e),
/// }
/// ```
pub fn init() -> Result<Config> {
    info!("initializing {} v{}", NAME, VERSION);

    let config = match ConfigLoader::load() {
        Ok(config) => {
            info!("configuration loaded from default location");
            config
        }
        Err(Error::ConfigNotFound) => {
            info!("no configuration file found, using defaults");
            Config::default()
        }
        Err(e) => {
            warn!("failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };

    Ok(config)
}

/// Initialize Glassbox with a custom configuration file
///
/// Unlike [`init`], a missing or invalid file is an error here: an
/// explicitly requested config should not silently fall back.
pub fn init_with_config(config_path: &std::path::Path) -> Result<Config> {
    info!(
        "initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    if !config_path.exists() {
        return Err(Error::ConfigLoadFailed {
            path: config_path.to_path_buf(),
            reason: "configuration file does not exist".to_string(),
        });
    }

    let config = ConfigLoader::load_from_file(config_path)?;
    info!("configuration loaded from: {}", config_path.display());
    Ok(config)
}

/// Get default configuration
///
/// Returns a `Config` instance with all default values. Useful for tests
/// or for inspecting the defaults.
///
/// # Examples
///
/// ```
/// use glassbox::default_config;
///
/// let config = default_config();
/// assert_eq!(config.console.scope, "module");
/// ```
pub fn default_config() -> Config {
    Config::default()
}
