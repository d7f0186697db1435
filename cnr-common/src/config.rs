//! Bootstrap configuration loading and database path resolution
//!
//! The TOML file is optional. A missing file never stops a run: the loader
//! falls back to built-in defaults and reports where the config came from.
//! A file that exists but cannot be parsed is a configuration error.
//!
//! # Resolution priority for the store path
//!
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`database_path`)
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable naming the store database file
pub const DATABASE_ENV_VAR: &str = "CNR_DATABASE";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite store (relative or absolute)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Replacement district table, display name → district id
    ///
    /// When absent the built-in table is used.
    #[serde(default)]
    pub districts: Option<BTreeMap<String, i64>>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Parse TOML config text
pub fn parse_toml_config(content: &str) -> std::result::Result<TomlConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Where the bootstrap configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Parsed from this file
    File(PathBuf),
    /// This file was requested but does not exist; defaults used
    Missing(PathBuf),
    /// No file requested and none at the default location
    Defaults,
}

/// Load the config file if one can be found, otherwise built-in defaults
///
/// `explicit` is the path given on the command line (or via `CNR_CONFIG`).
/// Without it the per-user default location is tried. Runs before logging
/// is set up, so the caller reports the origin.
pub fn load_or_default(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigOrigin)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok((TomlConfig::default(), ConfigOrigin::Defaults)),
        },
    };

    if !path.exists() {
        return Ok((TomlConfig::default(), ConfigOrigin::Missing(path)));
    }

    let config = load_toml_config(&path)?;
    Ok((config, ConfigOrigin::File(path)))
}

/// Resolve the store path following the priority order above
pub fn resolve_database_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.database_path {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_database_path()
}

/// Per-user config file location (`<config dir>/cnr/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cnr").join("config.toml"))
}

/// OS-dependent default store location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("cnr").join("cnr.db"))
        .unwrap_or_else(|| PathBuf::from("./cnr_data/cnr.db"))
}
