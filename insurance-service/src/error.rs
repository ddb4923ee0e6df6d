use error_common::RustCareError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsuranceError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(u32),

    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),
}

pub type InsuranceResult<T> = Result<T, InsuranceError>;

impl From<InsuranceError> for RustCareError {
    fn from(err: InsuranceError) -> Self {
        match err {
            InsuranceError::ClaimNotFound(_) => RustCareError::NotFound(err.to_string()),
            InsuranceError::UnknownStatus(_) => RustCareError::ValidationError(err.to_string()),
        }
    }
}
