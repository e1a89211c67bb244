//! Log subscriber setup.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` raises the
/// configured level to at least `debug`. Logs go to stderr so they never
/// mix with command output.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    let level = effective_level(&config.level, verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn effective_level(configured: &str, verbose: bool) -> Level {
    let level = configured.parse::<Level>().unwrap_or(Level::WARN);
    if verbose && level < Level::DEBUG {
        Level::DEBUG
    } else {
        level
    }
}
