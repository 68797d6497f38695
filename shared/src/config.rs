//! Application configuration for Vintry.
//!
//! The CLI keeps a small YAML file under the platform configuration
//! directory: the default cellar path, the field separator, and an
//! optional listing template. A missing file simply yields the defaults,
//! so nothing has to be set up before first use.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::codec::DEFAULT_SEPARATOR;
use crate::core::errors::{CoreError, CoreResult};

/// Settings the CLI reads before dispatching a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cellar file used when `--file` is not given
    pub cellar_path: Option<PathBuf>,

    /// Field separator for the delimited form
    pub separator: char,

    /// Display template used by `list` when none is given
    pub list_template: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cellar_path: None,
            separator: DEFAULT_SEPARATOR,
            list_template: None,
        }
    }
}

/// Loads and saves the application configuration file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
    config: AppConfig,
    loaded: bool,
}

impl ConfigManager {
    /// Create a manager for the given config file path
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            config: AppConfig::default(),
            loaded: false,
        }
    }

    /// The conventional config file location for this platform
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vintry").join("config.yml"))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist. Safe to call more than once.
    pub fn load(&mut self) -> CoreResult<()> {
        match fs::read_to_string(&self.config_path) {
            Ok(text) => {
                self.config = serde_yaml::from_str(&text).map_err(|e| {
                    CoreError::configuration(format!(
                        "failed to parse config file '{}': {e}",
                        self.config_path.display()
                    ))
                })?;
                debug!(path = %self.config_path.display(), "loaded configuration");
            }
            Err(_) => {
                self.config = AppConfig::default();
                debug!("no config file, using defaults");
            }
        }

        self.loaded = true;
        Ok(())
    }

    /// Save the configuration to its file, creating parent directories
    pub fn save(&self) -> CoreResult<()> {
        if !self.loaded {
            return Err(CoreError::precondition("configuration has not been loaded"));
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&self.config).map_err(|e| {
            CoreError::configuration(format!("failed to serialize configuration: {e}"))
        })?;
        fs::write(&self.config_path, yaml)?;
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }
}
