//! Logging setup with automatic PII redaction
//!
//! Installs the process-wide `tracing` subscriber and provides the
//! [`PiiRedactor`] used to scrub patient-identifying text (emails, phone
//! numbers, card numbers, insurance policy numbers) before it reaches a log
//! line. Redacted values can optionally be replaced by a short SHA-256 hash so
//! that repeated occurrences still correlate.
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::{LoggerConfig, PiiRedactor, RedactionConfig};
//!
//! let config = LoggerConfig::default();
//! let redactor = PiiRedactor::new(RedactionConfig::from_logger_config(&config));
//! let line = redactor.redact("Claim filed under policy HG-2024-1234");
//! assert!(!line.contains("HG-2024-1234"));
//! ```

pub mod redactor;
pub mod config;

pub use redactor::*;
pub use config::*;

use error_common::{RustCareError, Result};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `config.log_level`. Output goes to stderr so command output on stdout
/// stays machine-readable.
pub fn init(app_name: &str, config: &LoggerConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            RustCareError::ConfigError(format!("Invalid log level '{}': {}", config.log_level, e))
        })?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json {
        registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(app_name.to_string(), std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };

    installed.map_err(|e| RustCareError::InternalError(format!("Failed to install logger: {}", e)))
}
