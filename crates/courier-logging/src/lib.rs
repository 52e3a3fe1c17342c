// ABOUTME: Public API for courier logging infrastructure using tokio-tracing
// ABOUTME: Provides centralized configuration, initialization and runtime level changes

pub mod config;
pub mod layers;
pub mod reload;
pub mod subscriber;


#[cfg(test)]
mod test_support;

// Re-export tracing macros for convenience
pub use tracing::{Level, Span, debug, debug_span, error, info, instrument, span, trace, warn};

use std::sync::OnceLock;

pub use config::{FileConfig, LogLevel, LoggingConfig, OutputConfig};
pub use reload::LoggingReloadHandle;
pub use subscriber::{init_subscriber, init_subscriber_with_reload};

use anyhow::Result;

/// Global reload handle for runtime log level updates
static GLOBAL_RELOAD_HANDLE: OnceLock<LoggingReloadHandle> = OnceLock::new();

/// Initialize logging with the default configuration plus environment overrides.
pub fn init_logging() -> Result<()> {
    init_logging_with_config(LoggingConfig::from_env()?)
}

/// Initialize logging with a custom configuration.
///
/// The reload handle is kept globally so [`update_log_level`] and friends work afterwards.
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    init_logging_with_reload(config).map(|_| ())
}

/// Initialize logging and return the reload handle.
pub fn init_logging_with_reload(config: LoggingConfig) -> Result<LoggingReloadHandle> {
    let handle = init_subscriber_with_reload(config)?;
    let _ = GLOBAL_RELOAD_HANDLE.set(handle.clone());
    Ok(handle)
}

fn global_handle() -> Result<&'static LoggingReloadHandle> {
    GLOBAL_RELOAD_HANDLE
        .get()
        .ok_or_else(|| anyhow::anyhow!("Logging not initialized with reload support"))
}

/// Update the global log level at runtime.
pub fn update_log_level(level: Level) -> Result<()> {
    global_handle()?.update_log_level(level)
}

/// Update a module-specific log level at runtime.
pub fn update_module_level(module: &str, level: Level) -> Result<()> {
    global_handle()?.update_module_level(module, level)
}

/// Re-read log levels from the environment at runtime.
pub fn reload_from_env() -> Result<()> {
    global_handle()?.reload_from_env()
}

/// Flush buffered file output and stop the file writer. Call before exit.
pub fn shutdown_logging() -> bool {
    subscriber::shutdown()
}
