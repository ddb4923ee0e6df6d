use error_common::RustCareError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BillingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid quantity {quantity} for line item {item_id}")]
    InvalidQuantity { item_id: String, quantity: i64 },

    #[error("Invoice total is negative: {0}")]
    NegativeTotal(Decimal),

    #[error("Unknown procedure: {0}")]
    UnknownProcedure(String),

    #[error("Invoice {0} exceeds the representable amount")]
    AmountOutOfRange(&'static str),
}

pub type BillingResult<T> = Result<T, BillingError>;

impl From<BillingError> for RustCareError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::Validation(_) | BillingError::InvalidQuantity { .. } => {
                RustCareError::ValidationError(err.to_string())
            }
            BillingError::NegativeTotal(_) | BillingError::AmountOutOfRange(_) => {
                RustCareError::BusinessError(err.to_string())
            }
            BillingError::UnknownProcedure(_) => RustCareError::NotFound(err.to_string()),
        }
    }
}
