//! Configuration file discovery and loading
//!
//! Looks for a config file in the conventional places, first match wins:
//!
//! 1. `$GLASSBOX_CONFIG`
//! 2. `$XDG_CONFIG_HOME/glassbox/config.toml` (via `dirs`)
//! 3. `~/.glassbox.toml`
//! 4. `./glassbox.toml`

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};

/// Loads configuration files from default or explicit locations
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the first config file found in the search paths
    pub fn load() -> Result<Config> {
        for path in Self::search_paths() {
            if path.exists() {
                debug!("loading config from {}", path.display());
                return Self::load_from_file(&path);
            }
        }
        Err(Error::ConfigNotFound)
    }

    /// Load and validate a specific config file
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&text)?;
        config
            .validate()
            .map_err(|e| Error::ConfigValidationFailed {
                field: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(config)
    }

    /// Load with fallback to defaults, logging instead of failing
    pub fn load_or_default() -> Config {
        match Self::load() {
            Ok(config) => config,
            Err(Error::ConfigNotFound) => {
                debug!("no config file found, using defaults");
                Config::default()
            }
            Err(e) => {
                warn!("failed to load configuration: {}. Using defaults", e);
                Config::default()
            }
        }
    }

    /// Candidate config file locations, in priority order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(explicit) = env::var("GLASSBOX_CONFIG") {
            paths.push(PathBuf::from(explicit));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("glassbox").join("config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".glassbox.toml"));
        }
        paths.push(PathBuf::from("glassbox.toml"));

        paths
    }
}
