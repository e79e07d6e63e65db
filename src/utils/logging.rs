//! Structured logging setup.
//!
//! Builds a `tracing-subscriber` registry driven by [`LoggingConfig`]: an
//! `EnvFilter` plus one fmt layer per enabled output (console, file).
//! `RUST_LOG` takes precedence over the configured level.

use crate::config::LoggingConfig;
use crate::error::{BridgeError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{info, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

fn fmt_layer<S, W>(writer: W, json: bool, ansi: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Build a subscriber for `config` without installing it.
///
/// # Errors
/// Returns [`BridgeError::ConfigError`] when the configuration does not
/// validate or the log file cannot be opened.
pub fn build_subscriber(config: &LoggingConfig) -> Result<impl Subscriber + Send + Sync + 'static> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(BridgeError::ConfigError(format!(
            "Invalid logging configuration: {}",
            errors.join("; ")
        )));
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_lowercase()));

    let console = config
        .log_to_console
        .then(|| fmt_layer(std::io::stdout, config.json_format, true));

    let file = match (config.log_to_file, config.log_file_path.as_deref()) {
        (true, Some(path)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| BridgeError::ConfigError(format!("Failed to open log file: {e}")))?;
            Some(fmt_layer(Mutex::new(file), config.json_format, false))
        }
        _ => None,
    };

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file))
}

fn announce(config: &LoggingConfig) {
    info!(
        app = %config.app_name,
        level = %config.log_level,
        console = config.log_to_console,
        file = config.log_file_path.as_deref().unwrap_or("-"),
        "Logging initialised"
    );
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` if a subscriber was already installed, which makes
/// repeated calls (e.g. from several tests) harmless.
///
/// # Errors
/// Returns [`BridgeError::ConfigError`] when the configuration does not
/// validate or the log file cannot be opened.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    let installed = build_subscriber(config)?.try_init().is_ok();
    if installed {
        announce(config);
    }
    Ok(installed)
}
