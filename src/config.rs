//! Configuration management for edtext
//!
//! edtext stores configuration in ~/.edtext/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// edtext configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Substitution settings
    #[serde(default)]
    pub substitution: SubstitutionConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write debug logs to ~/.edtext/edtext.log
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionConfig {
    /// Replace every match per line instead of only the first
    #[serde(default)]
    pub global: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Prefix printed lines with their original line number
    #[serde(default)]
    pub number_lines: bool,

    /// Color line numbers when writing to a terminal
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            number_lines: false,
            color: true,
        }
    }
}

fn default_color() -> bool {
    true
}

/// Get the edtext home directory (~/.edtext)
pub fn config_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".edtext"))
}

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

fn get_default_config_content() -> &'static str {
    r#"# edtext Configuration File
#
# Values set here can be overridden by command-line flags.

[logging]
# Write debug logs to ~/.edtext/edtext.log (default: false)
# The EDTEXT_LOG environment variable overrides the log filter.
debug = false

[substitution]
# Replace every match on a line instead of only the first (default: false)
# Same as passing -g on the command line.
global = false

[output]
# Prefix printed lines with their original line number (default: false)
number_lines = false

# Color line numbers when stdout is a terminal (default: true)
color = true
"#
}

/// Write the default commented configuration file to `path`
pub fn save_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    fs::write(path, get_default_config_content())
        .with_context(|| format!("Failed to write default config file: {}", path.display()))?;

    Ok(())
}

/// Parse a configuration file without any fallback
pub fn load_from_path(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from `path`, creating a default file if needed
///
/// A malformed file is replaced with the defaults.
pub fn load_or_create(path: &Path) -> Result<Config> {
    if !path.exists() {
        save_default_config(path)?;
        return Ok(Config::default());
    }

    match load_from_path(path) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!(error = %e, "malformed config, restoring defaults");
            save_default_config(path)?;
            Ok(Config::default())
        }
    }
}

/// Load configuration from `path` without touching the file system
///
/// A missing or malformed file gives the defaults.
pub fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    load_from_path(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "malformed config, using defaults");
        Config::default()
    })
}

/// Load configuration from ~/.edtext/config.toml, read-only
pub fn load_config() -> Result<Config> {
    Ok(load_or_default(&config_file_path()?))
}
