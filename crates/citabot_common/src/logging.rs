//! Logging utilities for the citabot application.
//!
//! All crates log through `tracing`; the binary installs the subscriber once
//! at start-up with [`init_with_config`].

use citabot_config::LoggingConfig;
use tracing::{error, info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Initialize logging from the `logging` config section.
///
/// When `directory` is set, a daily rolling file is written next to stdout.
/// The returned guard flushes that file on drop and must be kept alive by the
/// caller for the lifetime of the process.
pub fn init_with_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = parse_level(&config.level);

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(file_layer)
        .with(build_filter(level))
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized at level: {} (file: {})",
            level,
            config.directory.as_deref().unwrap_or("disabled")
        );
    }
    guard
}

fn stdout_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
}

// `citabot*` targets and the request spans of `TraceLayer` follow the configured level.
fn build_filter(level: Level) -> EnvFilter {
    ["citabot", "tower_http"]
        .iter()
        .filter_map(|target| format!("{}={}", target, level).parse::<Directive>().ok())
        .fold(EnvFilter::from_default_env(), |filter, directive| {
            filter.add_directive(directive)
        })
}

/// Parses a level name, falling back to INFO.
pub fn parse_level(level: &str) -> Level {
    level.parse::<Level>().unwrap_or_else(|_| {
        warn!("Unknown log level '{}', using info", level);
        Level::INFO
    })
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_filter_covers_request_traces() {
        let filter = build_filter(Level::DEBUG).to_string();
        assert!(filter.contains("citabot=debug"), "{}", filter);
        assert!(filter.contains("tower_http=debug"), "{}", filter);
    }
}
