// ABOUTME: Runtime log level changes for an installed subscriber
// ABOUTME: Rebuilds the level filter from an updated configuration and swaps it in place

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, reload};

use crate::config::LoggingConfig;
use crate::layers::create_env_filter;

/// Handle for updating log levels at runtime.
#[derive(Clone)]
pub struct LoggingReloadHandle {
    filter_handle: reload::Handle<EnvFilter, Registry>,
    current_config: Arc<RwLock<LoggingConfig>>,
}

impl LoggingReloadHandle {
    pub fn new(filter_handle: reload::Handle<EnvFilter, Registry>, config: LoggingConfig) -> Self {
        Self {
            filter_handle,
            current_config: Arc::new(RwLock::new(config)),
        }
    }

    pub fn update_log_level(&self, level: Level) -> Result<()> {
        self.apply(|config| config.level = level.into())?;
        tracing::info!(new_level = %level, "Log level updated at runtime");
        Ok(())
    }

    pub fn update_module_level(&self, module: &str, level: Level) -> Result<()> {
        self.apply(|config| {
            config
                .module_levels
                .insert(module.to_string(), level.into());
        })?;
        tracing::info!(module = %module, new_level = %level, "Module log level updated at runtime");
        Ok(())
    }

    /// Re-read levels from `COURIER_LOG` / `RUST_LOG`. Outputs stay as they are.
    pub fn reload_from_env(&self) -> Result<()> {
        let mut env_config =
            LoggingConfig::from_env().context("Failed to load configuration from environment")?;

        let (level, module_count) = {
            let mut config = self.current_config.write();
            env_config.output = config.output.clone();
            env_config.file = config.file.clone();

            self.swap_filter(&env_config)?;
            *config = env_config;
            (config.level.0, config.module_levels.len())
        };

        tracing::info!(
            level = %level,
            module_count,
            "Logging configuration reloaded from environment"
        );
        Ok(())
    }

    pub fn current_config(&self) -> LoggingConfig {
        self.current_config.read().clone()
    }

    /// Applies `update` to a copy of the configuration and commits it only if
    /// the new filter was installed.
    fn apply(&self, update: impl FnOnce(&mut LoggingConfig)) -> Result<()> {
        let mut config = self.current_config.write();
        let mut updated = config.clone();
        update(&mut updated);

        self.swap_filter(&updated)?;
        *config = updated;
        Ok(())
    }

    fn swap_filter(&self, config: &LoggingConfig) -> Result<()> {
        let filter =
            create_env_filter(config).context("Failed to create new environment filter")?;
        self.filter_handle
            .reload(filter)
            .context("Failed to reload log filter")
    }
}
