use crate::codes;
use crate::context::ErrorContext;
use thiserror::Error;

/// Simplified error enum for common use cases
#[derive(Error, Debug)]
pub enum RustCareError {
    /// Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Billing rule violations
    #[error("Business logic error: {0}")]
    BusinessError(String),

    /// Unknown claim, procedure or line item
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RustCareError {
    /// Stable code reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            RustCareError::ValidationError(_) => codes::validation::INVALID_INPUT,
            RustCareError::BusinessError(_) => codes::billing::NEGATIVE_TOTAL,
            RustCareError::NotFound(_) => codes::lookup::NOT_FOUND,
            RustCareError::ConfigError(_) => codes::config::LOAD_FAILED,
            RustCareError::InternalError(_) | RustCareError::Other(_) => codes::system::INTERNAL,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            RustCareError::ValidationError(_) => "validation",
            RustCareError::BusinessError(_) => "business",
            RustCareError::NotFound(_) => "not_found",
            RustCareError::ConfigError(_) => "config",
            RustCareError::InternalError(_) | RustCareError::Other(_) => "internal",
        }
    }
}

/// Result type alias for RustCare operations
pub type Result<T> = std::result::Result<T, RustCareError>;

/// Logs an error together with its code and context fields
pub fn log_error(context: &ErrorContext, error: &RustCareError) {
    tracing::error!(
        operation = %context.operation,
        error_code = error.code(),
        error_type = error.error_type(),
        context = %context.describe(),
        error = %error,
        "RustCare error occurred"
    );
}
