// ABOUTME: Global tracing subscriber installation
// ABOUTME: Composes a reloadable level filter with the configured output layers

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Registry, layer::Layered, prelude::*, registry::LookupSpan, reload,
};

use crate::config::LoggingConfig;
use crate::layers::{
    BoxedLayer, create_console_layer, create_env_filter, create_file_layer, create_json_layer,
};
use crate::reload::LoggingReloadHandle;

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;

/// Keeps the global file writer running until [`shutdown`].
static FILE_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Initialize the global tracing subscriber with the given configuration.
pub fn init_subscriber(config: LoggingConfig) -> Result<()> {
    init_subscriber_with_reload(config).map(|_| ())
}

/// Initialize the global tracing subscriber with hot-reload support.
///
/// The returned handle swaps the level filter without touching the outputs.
pub fn init_subscriber_with_reload(config: LoggingConfig) -> Result<LoggingReloadHandle> {
    let env_filter = create_env_filter(&config).context("Failed to create environment filter")?;
    let (filter_layer, filter_handle) = reload::Layer::new(env_filter);

    let (layers, guard) = build_layers::<FilteredRegistry>(&config)?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(layers)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    if let Some(guard) = guard {
        *FILE_GUARD.lock() = Some(guard);
    }

    tracing::info!(
        log_level = %config.level.0,
        console_output = config.output.console,
        file_output = config.output.file,
        json_output = config.output.json,
        file_path = %config.file.path.display(),
        "Courier logging initialized"
    );

    Ok(LoggingReloadHandle::new(filter_handle, config))
}

/// Flushes buffered file output and stops the file writer.
///
/// Returns whether a file writer was running. Later file lines are dropped.
pub fn shutdown() -> bool {
    FILE_GUARD.lock().take().is_some()
}

/// The output layers enabled by `config`, in console, JSON, file order,
/// plus the file writer's guard when file output is on.
pub fn build_layers<S>(
    config: &LoggingConfig,
) -> Result<(Vec<BoxedLayer<S>>, Option<WorkerGuard>)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let mut layers = Vec::new();
    layers.extend(create_console_layer(&config.output));
    layers.extend(create_json_layer(&config.output));

    let mut guard = None;
    if config.output.file {
        let (layer, file_guard) =
            create_file_layer(&config.file).context("Failed to set up file logging")?;
        layers.push(layer);
        guard = Some(file_guard);
    }

    Ok((layers, guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfig, OutputConfig};
    use tempfile::tempdir;

    fn config_with(output: OutputConfig, file: FileConfig) -> LoggingConfig {
        LoggingConfig {
            output,
            file,
            ..Default::default()
        }
    }

    #[test]
    fn test_console_only() {
        let config = config_with(
            OutputConfig {
                console: true,
                file: false,
                ..Default::default()
            },
            FileConfig::default(),
        );

        let (layers, guard) = build_layers::<Registry>(&config).unwrap();
        assert_eq!(layers.len(), 1);
        assert!(guard.is_none());
    }

    #[test]
    fn test_json_replaces_console() {
        let config = config_with(
            OutputConfig {
                console: true,
                file: false,
                json: true,
                pretty_console: false,
            },
            FileConfig::default(),
        );

        let (layers, guard) = build_layers::<Registry>(&config).unwrap();
        assert_eq!(layers.len(), 1);
        assert!(guard.is_none());
    }

    #[test]
    fn test_console_and_file() {
        let temp_dir = tempdir().unwrap();
        let config = config_with(
            OutputConfig {
                console: true,
                file: true,
                ..Default::default()
            },
            FileConfig {
                path: temp_dir.path().join("courier.log"),
                max_files: 2,
            },
        );

        let (layers, guard) = build_layers::<Registry>(&config).unwrap();
        assert_eq!(layers.len(), 2);
        assert!(guard.is_some());
    }

    #[test]
    fn test_all_outputs_disabled() {
        let config = config_with(
            OutputConfig {
                console: false,
                file: false,
                json: false,
                pretty_console: false,
            },
            FileConfig::default(),
        );

        let (layers, guard) = build_layers::<Registry>(&config).unwrap();
        assert!(layers.is_empty());
        assert!(guard.is_none());
    }
}
