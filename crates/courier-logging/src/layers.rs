// ABOUTME: Output layer constructors for console, JSON and rolling file logging
// ABOUTME: Also builds the level filter from the logging configuration

use anyhow::{Context, Result};
use std::fs;
use tracing::Subscriber;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    registry::LookupSpan,
};

use crate::config::{FileConfig, LoggingConfig, OutputConfig};

pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Human readable stdout output. Disabled when JSON output is on.
pub fn create_console_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.console || config.json {
        return None;
    }

    let layer = if config.pretty_console {
        fmt::layer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .pretty()
            .boxed()
    } else {
        fmt::layer().with_target(true).compact().boxed()
    };

    Some(layer)
}

/// JSON lines on stdout for log shippers.
pub fn create_json_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.json {
        return None;
    }

    let layer = fmt::layer()
        .json()
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .boxed();

    Some(layer)
}

/// Daily rolling file output keeping `max_files` files.
///
/// Lines are written by a background worker. Dropping the returned guard
/// flushes them and stops the worker, so keep it for as long as the layer logs.
pub fn create_file_layer<S>(config: &FileConfig) -> Result<(BoxedLayer<S>, WorkerGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let directory = config
        .path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));

    fs::create_dir_all(directory).with_context(|| {
        format!("Failed to create log directory: {}", directory.display())
    })?;

    let file_name = config
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Invalid log file path")?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(file_name)
        .max_log_files(config.max_files.max(1))
        .build(directory)
        .context("Failed to create rolling log file")?;
    let (writer, guard) = non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .boxed();

    Ok((layer, guard))
}

/// Build the level filter: the global level plus per-module directives.
pub fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::new(config.level.0.as_str().to_lowercase());

    for (module, level) in &config.module_levels {
        let directive = format!("{}={}", module, level.0.as_str().to_lowercase());
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("Invalid filter directive '{directive}'"))?,
        );
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use crate::test_support::SharedBuffer;
    use tempfile::tempdir;
    use tracing::Level;
    use tracing_subscriber::{Registry, prelude::*};

    #[test]
    fn test_create_console_layer() {
        let config = OutputConfig {
            console: true,
            pretty_console: true,
            ..Default::default()
        };
        assert!(create_console_layer::<Registry>(&config).is_some());

        let config = OutputConfig {
            console: false,
            ..Default::default()
        };
        assert!(create_console_layer::<Registry>(&config).is_none());

        // JSON output replaces console output
        let config = OutputConfig {
            console: true,
            json: true,
            ..Default::default()
        };
        assert!(create_console_layer::<Registry>(&config).is_none());
    }

    #[test]
    fn test_create_json_layer() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        assert!(create_json_layer::<Registry>(&config).is_some());

        let config = OutputConfig {
            json: false,
            ..Default::default()
        };
        assert!(create_json_layer::<Registry>(&config).is_none());
    }

    #[test]
    fn test_create_file_layer() {
        let temp_dir = tempdir().unwrap();
        let config = FileConfig {
            path: temp_dir.path().join("logs").join("courier.log"),
            max_files: 3,
        };

        let result = create_file_layer::<Registry>(&config);
        assert!(result.is_ok());
        assert!(temp_dir.path().join("logs").is_dir());
    }

    #[test]
    fn test_dropping_guard_flushes_file() {
        let temp_dir = tempdir().unwrap();
        let config = FileConfig {
            path: temp_dir.path().join("courier.log"),
            max_files: 1,
        };

        let (layer, guard) = create_file_layer::<Registry>(&config).unwrap();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(event_type = "transport-abort", "Transport aborted");
        });
        drop(guard);

        let contents: String = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("courier.log"))
            .map(|entry| std::fs::read_to_string(entry.path()).unwrap())
            .collect();
        assert!(contents.contains("Transport aborted"), "{contents}");
        assert!(contents.contains("transport-abort"), "{contents}");
    }

    #[test]
    fn test_env_filter_applies_module_levels() {
        let mut config = LoggingConfig {
            level: LogLevel(Level::WARN),
            ..Default::default()
        };
        config
            .module_levels
            .insert("courier_events".to_string(), LogLevel(Level::DEBUG));

        let buffer = SharedBuffer::default();
        let subscriber = tracing_subscriber::registry()
            .with(create_env_filter(&config).unwrap())
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(buffer.clone()),
            );

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "courier_events::target", "Event dispatched");
            tracing::debug!(target: "courier_types", "Payload parsed");
            tracing::warn!(target: "courier_types", "Payload rejected");
        });

        let contents = buffer.contents();
        assert!(contents.contains("Event dispatched"), "{contents}");
        assert!(!contents.contains("Payload parsed"), "{contents}");
        assert!(contents.contains("Payload rejected"), "{contents}");
    }
}
