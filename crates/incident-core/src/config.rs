//! Configuration loading and typed config structures.
//!
//! The configuration lives in `incident-config.yaml` at the working
//! directory. Every field has a default, so an empty or missing file yields
//! the stock behavior: a 60-second clock, the `normal` scenario, the
//! `hurry` intent, and `info` logging.

use std::path::Path;

use incident_types::{Intent, Scenario};
use serde::Deserialize;

use crate::clock::DEFAULT_TICK_INTERVAL;

/// Environment variable that overrides `clock.tick_interval_seconds`.
pub const TICK_INTERVAL_ENV: &str = "INCIDENT_TICK_INTERVAL_SECONDS";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value that could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    Env {
        /// The environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SolverConfig {
    /// Clock settings.
    #[serde(default)]
    pub clock: ClockConfig,

    /// Initial selection state.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Demo binary settings.
    #[serde(default)]
    pub demo: DemoConfig,
}

impl SolverConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `INCIDENT_TICK_INTERVAL_SECONDS` overrides
    /// `clock.tick_interval_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Env`] if the override is not a number.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply environment overrides through the given lookup.
    ///
    /// The lookup is injected so overrides can be exercised without
    /// touching the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if an override value does not parse.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(TICK_INTERVAL_ENV) {
            self.clock.tick_interval_seconds =
                value
                    .trim()
                    .parse()
                    .map_err(|_err: std::num::ParseIntError| ConfigError::Env {
                        var: TICK_INTERVAL_ENV,
                        value,
                    })?;
        }
        Ok(())
    }
}

/// Clock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// Seconds between clock notifications. Must be at least 1.
    #[serde(default = "default_tick_interval_seconds")]
    pub tick_interval_seconds: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_seconds: default_tick_interval_seconds(),
        }
    }
}

/// Initial selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Scenario active at startup.
    #[serde(default)]
    pub initial_scenario: Scenario,

    /// Intent selected at startup.
    #[serde(default)]
    pub initial_intent: Intent,
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, one event per line.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes
    /// precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Demo binary settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DemoConfig {
    /// Stop after this many clock ticks. 0 runs until Ctrl-C.
    #[serde(default)]
    pub max_ticks: u64,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_tick_interval_seconds() -> u64 {
    DEFAULT_TICK_INTERVAL.as_secs()
}

fn default_log_level() -> String {
    "info".to_owned()
}
