// Logger configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub log_level: String,
    /// Emit bunyan JSON records instead of human-readable lines
    pub json: bool,
    pub redaction_enabled: bool,
    pub hash_for_correlation: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
            redaction_enabled: true,
            hash_for_correlation: true,
        }
    }
}

impl LoggerConfig {
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.log_level = "debug".to_string();
        }
        self
    }
}
