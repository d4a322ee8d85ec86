//! Configuration management for resize
//!
//! Options arrive as raw strings ([`RawOptions`]) and are turned into a
//! [`ResizeJob`] by the [`Resolver`]. Anything not given on the command line
//! falls back to [`JobDefaults`], which an optional defaults file can override.

use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ResizeError, Result};

pub mod job;
pub mod options;
pub mod resolver;

pub use job::*;
pub use options::*;
pub use resolver::*;

/// Contents of a defaults file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fallbacks for options missing from the command line
    pub defaults: JobDefaults,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Values used for options that were not given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDefaults {
    pub down_interpolation: Interpolation,
    pub up_interpolation: Interpolation,

    /// Worker count (None = number of logical CPUs)
    pub threads: Option<usize>,

    pub jpeg_quality: u8,
    pub output_format: OutputFormat,

    /// Appended to the file stem when originals are kept
    pub suffix: String,
}

impl Default for JobDefaults {
    fn default() -> Self {
        Self {
            down_interpolation: Interpolation::Area,
            up_interpolation: Interpolation::Linear,
            threads: None, // Auto-detect
            jpeg_quality: 95,
            output_format: OutputFormat::Jpg,
            suffix: "_resized".to_string(),
        }
    }
}

impl JobDefaults {
    /// Default worker count, never zero
    pub fn thread_count(&self) -> NonZeroUsize {
        self.threads
            .and_then(NonZeroUsize::new)
            .or_else(|| NonZeroUsize::new(num_cpus::get()))
            .unwrap_or(NonZeroUsize::MIN)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ResizeError::config(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let config: Self = match extension_of(path.as_ref()).as_str() {
            "toml" => toml::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => {
                return Err(ResizeError::config(
                    "Unsupported config file format. Use .toml or .yaml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = match extension_of(path.as_ref()).as_str() {
            "toml" => toml::to_string_pretty(self)
                .map_err(|e| ResizeError::config(format!("TOML serialization failed: {}", e)))?,
            "yaml" | "yml" => serde_yaml::to_string(self)
                .map_err(|e| ResizeError::config(format!("YAML serialization failed: {}", e)))?,
            _ => {
                return Err(ResizeError::config(
                    "Unsupported config file format. Use .toml or .yaml",
                ))
            }
        };

        std::fs::write(&path, content).map_err(|e| {
            ResizeError::config(format!(
                "Failed to write config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.defaults.threads == Some(0) {
            return Err(ResizeError::config("Thread count must be greater than 0"));
        }

        if self.defaults.jpeg_quality > 100 {
            return Err(ResizeError::config(format!(
                "JPEG quality must be between 0 and 100, got {}",
                self.defaults.jpeg_quality
            )));
        }

        resolver::validate_suffix(&self.defaults.suffix)
            .map_err(|e| ResizeError::config(format!("Invalid default suffix: {}", e)))?;

        Ok(())
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}
