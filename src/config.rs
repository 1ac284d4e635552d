//! Configuration management and validation
//!
//! Settings are layered: built-in defaults, then an optional TOML file
//! (`~/.config/airport-reporter/config.toml` unless overridden), then CLI
//! arguments applied by the command layer.

use crate::constants::{
    DEFAULT_AIRPORTS_FILE, DEFAULT_COUNTRIES_FILE, DEFAULT_RANKING_LIMIT, DEFAULT_RUNWAYS_FILE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source-file location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Directory searched for the default filenames when no explicit path is given
    pub data_dir: Option<PathBuf>,

    /// Filename looked up inside a directory for the airports source
    pub airports_file: String,

    /// Filename looked up inside a directory for the countries source
    pub countries_file: String,

    /// Filename looked up inside a directory for the runways source
    pub runways_file: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            airports_file: DEFAULT_AIRPORTS_FILE.to_string(),
            countries_file: DEFAULT_COUNTRIES_FILE.to_string(),
            runways_file: DEFAULT_RUNWAYS_FILE.to_string(),
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of entries in the airport-count ranking
    pub ranking_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            ranking_limit: DEFAULT_RANKING_LIMIT,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter: error, warn, info, debug or trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Default config file location (`~/.config/airport-reporter/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("airport-reporter").join("config.toml"))
            .ok_or_else(|| Error::configuration("Could not determine config directory"))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration with the layered approach: defaults, then the
    /// explicit config file if given, otherwise the default location when a
    /// file exists there
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_file {
            return Self::load(path);
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.report.ranking_limit == 0 {
            return Err(Error::configuration(
                "Ranking limit must be greater than 0",
            ));
        }

        if let Some(data_dir) = &self.sources.data_dir {
            if !data_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Data directory does not exist: {}",
                    data_dir.display()
                )));
            }
        }

        for (role, filename) in [
            ("airports", &self.sources.airports_file),
            ("countries", &self.sources.countries_file),
            ("runways", &self.sources.runways_file),
        ] {
            if filename.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "Default filename for the {} source cannot be empty",
                    role
                )));
            }
        }

        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(Error::configuration(format!(
                "Unknown log level '{}': expected error, warn, info, debug or trace",
                other
            ))),
        }
    }
}
