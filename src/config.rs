//! Client configuration

use std::path::PathBuf;

use clap::{Args, Parser};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// API connection settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base url of the REST API
    #[arg(long, env = "SPORK_API_BASE_URL", default_value = "http://localhost:5100/api")]
    pub api_base_url: String,
}

/// Local storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding cart and discount slots
    #[arg(long, env = "SPORK_STORAGE_DIR", default_value = ".spork")]
    pub storage_dir: PathBuf,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Spork client configuration
#[derive(Debug, Parser)]
#[command(name = "spork", about = "Spork ordering client", long_about = None)]
pub struct ClientConfig {
    /// API connection settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
