//! Logging
//!
//! One global `tracing` subscriber per process. HTTP client internals are capped at `warn` so
//! request failures stay visible without per-connection noise.

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::{LogFormat, LoggingConfig};

const QUIET_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// A global subscriber is already installed.
    #[error("logging already initialised: {0}")]
    AlreadyInitialised(#[from] TryInitError),
}

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` directives take precedence over the configured level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    match config.log_format {
        LogFormat::Compact => install(
            filter,
            tracing_subscriber::fmt::layer().compact().with_target(true),
        ),
        LogFormat::Json => install(
            filter,
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true),
        ),
    }
}

fn default_directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}

fn install<L>(filter: EnvFilter, layer: L) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    Ok(())
}
