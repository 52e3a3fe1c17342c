// ABOUTME: Logging configuration: levels, outputs and file settings
// ABOUTME: Loaded from defaults, a TOML file, and environment variable overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Wrapper for tracing::Level that implements Serialize/Deserialize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.as_str().to_lowercase())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<LogLevel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let level = parse_log_level(&s).map_err(serde::de::Error::custom)?;
        Ok(LogLevel(level))
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        LogLevel(level)
    }
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

/// Main configuration structure for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    pub level: LogLevel,

    /// Per-module log level overrides, e.g. `courier_events = "trace"`
    pub module_levels: HashMap<String, LogLevel>,

    pub output: OutputConfig,

    pub file: FileConfig,
}

/// Which outputs are enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub console: bool,

    pub file: bool,

    /// Emit JSON lines to stdout instead of human readable console output
    pub json: bool,

    /// Pretty-print console output (vs compact)
    pub pretty_console: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Path to log file (defaults to ~/.config/courier/courier.log)
    pub path: PathBuf,

    /// Number of daily log files to keep
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(Level::INFO),
            module_levels: HashMap::new(),
            output: OutputConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: true,
            json: false,
            pretty_console: false,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: default_log_file_path(),
            max_files: 5,
        }
    }
}

impl LoggingConfig {
    /// Create a new configuration with environment variable overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse a TOML logging configuration. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid logging configuration")
    }

    /// Load a TOML logging configuration file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read logging config: {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to this configuration.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // COURIER_LOG wins over RUST_LOG
        if let Ok(level_str) = env::var("COURIER_LOG") {
            self.level =
                LogLevel(parse_log_level(&level_str).context("Invalid COURIER_LOG level")?);
        } else if let Ok(rust_log) = env::var("RUST_LOG") {
            self.parse_rust_log(&rust_log)?;
        }

        if env::var("COURIER_LOG_JSON").is_ok() {
            self.output.json = true;
        }

        if env::var("COURIER_LOG_NO_CONSOLE").is_ok() {
            self.output.console = false;
        }

        if env::var("COURIER_LOG_NO_FILE").is_ok() {
            self.output.file = false;
        }

        Ok(())
    }

    /// Parse RUST_LOG style directives, e.g. `info,courier_events=trace`.
    fn parse_rust_log(&mut self, rust_log: &str) -> Result<()> {
        for directive in rust_log.split(',') {
            let directive = directive.trim();
            if directive.is_empty() {
                continue;
            }

            if let Some((module, level_str)) = directive.split_once('=') {
                let level = parse_log_level(level_str).with_context(|| {
                    format!("Invalid log level '{level_str}' for module '{module}'")
                })?;
                self.module_levels
                    .insert(module.to_string(), LogLevel(level));
            } else {
                self.level = LogLevel(
                    parse_log_level(directive)
                        .with_context(|| format!("Invalid global log level '{directive}'"))?,
                );
            }
        }
        Ok(())
    }
}

/// ~/.config/courier/courier.log, or ./courier.log without a config dir
fn default_log_file_path() -> PathBuf {
    match dirs::config_dir() {
        Some(config_dir) => config_dir.join("courier").join("courier.log"),
        None => PathBuf::from("courier.log"),
    }
}

/// Parse a log level string (case-insensitive).
pub(crate) fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ),
    }
}
