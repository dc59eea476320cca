//! Configuration for the `ectstracker` CLI
//!
//! A TOML file under the platform config directory, seeded from
//! compiled-in defaults on first run.

use crate::core::catalog::Catalog;
use crate::core::TrackerError;
use crate::logger::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the application config directory
const DIR_VARIABLE: &str = "$ECTS_TRACKER";

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: [&str; 7] = [
    "level",
    "file",
    "verbose",
    "data_dir",
    "exports_dir",
    "reports_dir",
    "catalog_file",
];

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path, empty for console only
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON document per state field
    #[serde(default)]
    pub data_dir: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Default directory for exported snapshots
    #[serde(default)]
    pub exports_dir: String,
    /// Default directory for generated reports
    #[serde(default)]
    pub reports_dir: String,
    /// Course catalog TOML; empty selects the built-in catalog
    #[serde(default)]
    pub catalog_file: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override the data directory
    pub data_dir: Option<String>,
    /// Override the exports directory
    pub exports_dir: Option<String>,
    /// Override the reports directory
    pub reports_dir: Option<String>,
    /// Override the catalog file
    pub catalog_file: Option<String>,
}

/// Fill `target` from `default` when empty. Returns whether it changed.
fn fill_empty(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        true
    } else {
        false
    }
}

/// Normalize `-` spellings of a key to the canonical `_` form
fn canonical_key(key: &str) -> String {
    key.trim().replace('-', "_")
}

impl Config {
    /// Get the `$ECTS_TRACKER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/ectstracker`
    /// - macOS: `~/Library/Application Support/ectstracker`
    /// - Windows: `%APPDATA%\ectstracker`
    #[must_use]
    pub fn get_app_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ectstracker")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are taken.
    /// Returns `true` if anything was filled in.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let filled = [
            fill_empty(&mut self.logging.level, &defaults.logging.level),
            fill_empty(&mut self.logging.file, &defaults.logging.file),
            fill_empty(&mut self.storage.data_dir, &defaults.storage.data_dir),
            fill_empty(&mut self.paths.exports_dir, &defaults.paths.exports_dir),
            fill_empty(&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            fill_empty(&mut self.paths.catalog_file, &defaults.paths.catalog_file),
        ];
        filled.contains(&true)
    }

    /// Apply CLI-provided overrides for this run only
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(dir) = &overrides.data_dir {
            self.storage.data_dir = Self::expand_variables(dir);
        }
        if let Some(dir) = &overrides.exports_dir {
            self.paths.exports_dir = Self::expand_variables(dir);
        }
        if let Some(dir) = &overrides.reports_dir {
            self.paths.reports_dir = Self::expand_variables(dir);
        }
        if let Some(file) = &overrides.catalog_file {
            self.paths.catalog_file = Self::expand_variables(file);
        }
    }

    /// Full path of the user config file
    ///
    /// `config.toml` in release builds, `dconfig.toml` in debug builds, inside
    /// [`get_app_dir`](Self::get_app_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_app_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$ECTS_TRACKER` to the application config directory
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let app_dir = Self::get_app_dir();
            value.replace(DIR_VARIABLE, app_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Parse a TOML config, expanding `$ECTS_TRACKER` in path values
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.storage.data_dir = Self::expand_variables(&config.storage.data_dir);
        config.paths.exports_dir = Self::expand_variables(&config.paths.exports_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.catalog_file = Self::expand_variables(&config.paths.catalog_file);

        Ok(config)
    }

    /// Load the compiled-in defaults for the current build profile
    ///
    /// # Panics
    /// Panics if the embedded defaults are not valid TOML, which is a build defect.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load the config file, creating it from defaults on first run
    ///
    /// Missing fields are merged from defaults and written back. Any read or
    /// parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        let parsed = fs::read_to_string(&config_file)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok());
        match parsed {
            Some(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            None => defaults,
        }
    }

    /// Write the config to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Write the config as TOML to `path`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file written
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Returns `None` for unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match canonical_key(key).as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_dir" => Some(self.storage.data_dir.clone()),
            "exports_dir" => Some(self.paths.exports_dir.clone()),
            "reports_dir" => Some(self.paths.reports_dir.clone()),
            "catalog_file" => Some(self.paths.catalog_file.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key (in memory; call [`save`](Self::save))
    ///
    /// # Errors
    /// Returns an error for unknown keys, an unknown log level, or a
    /// non-boolean `verbose`
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match canonical_key(key).as_str() {
            "level" => {
                let level: Level = value.parse()?;
                self.logging.level = level.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "data_dir" => self.storage.data_dir = value.to_string(),
            "exports_dir" => self.paths.exports_dir = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "catalog_file" => self.paths.catalog_file = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset one key to its value in `defaults`
    ///
    /// # Errors
    /// Returns an error if the key is not recognized
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match canonical_key(key).as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" => self.storage.data_dir.clone_from(&defaults.storage.data_dir),
            "exports_dir" => self.paths.exports_dir.clone_from(&defaults.paths.exports_dir),
            "reports_dir" => self.paths.reports_dir.clone_from(&defaults.paths.reports_dir),
            "catalog_file" => self
                .paths
                .catalog_file
                .clone_from(&defaults.paths.catalog_file),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the config file so the next [`load`](Self::load) recreates it
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Course catalog selected by `paths.catalog_file`
    ///
    /// # Errors
    /// Returns `TrackerError::Catalog` if the configured file cannot be loaded
    pub fn catalog(&self) -> Result<Catalog, TrackerError> {
        if self.paths.catalog_file.trim().is_empty() {
            Ok(Catalog::standard())
        } else {
            Catalog::load(Path::new(&self.paths.catalog_file))
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[storage]")?;
        writeln!(f, "  data_dir = \"{}\"", self.storage.data_dir)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  exports_dir = \"{}\"", self.paths.exports_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  catalog_file = \"{}\"", self.paths.catalog_file)?;

        Ok(())
    }
}
