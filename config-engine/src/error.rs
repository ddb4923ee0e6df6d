use error_common::RustCareError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] figment::Error),

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl From<ConfigError> for RustCareError {
    fn from(err: ConfigError) -> Self {
        RustCareError::ConfigError(err.to_string())
    }
}
