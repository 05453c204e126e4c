//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `fapisd.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Controller config to read.
    pub control: ControlSettings,
    /// Host settings.
    pub host: HostSettings,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Where the fapis come from.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Path of the controller JSON file.
    pub file: PathBuf,
    /// Section holding the API descriptors.
    pub section: String,
}

/// In-process host settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Name of the API owning the config; errors are reported on it.
    pub main_api: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `fapisd.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("fapisd.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FAPIS_CONFIG") {
            self.control.file = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("FAPIS_SECTION") {
            self.control.section = val;
        }
        if let Ok(val) = std::env::var("FAPIS_MAIN_API") {
            self.host.main_api = val;
        }
        if let Ok(val) = std::env::var("FAPIS_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.main_api.is_empty() {
            return Err(ConfigError::Validation(
                "main_api must not be empty".to_string(),
            ));
        }
        if self.control.section.is_empty() {
            return Err(ConfigError::Validation(
                "section must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Use `file` instead of the configured controller file.
    pub fn override_control_file(&mut self, file: impl Into<PathBuf>) {
        self.control.file = file.into();
    }
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("control.json"),
            section: "fapis".to_string(),
        }
    }
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            main_api: "controller".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "fapisd=info,fapis=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
