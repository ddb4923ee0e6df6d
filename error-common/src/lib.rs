//! Common error handling utilities for the RustCare billing engine
//!
//! This module provides the error umbrella shared by the billing, insurance
//! and configuration crates. Each service crate keeps its own `thiserror`
//! enum and converts into [`RustCareError`] at the boundary, where every
//! error resolves to a stable code string.
//!
//! # Error Categories
//!
//! - **ValidationError**: Rejected input (quantities, payment method, ids)
//! - **BusinessError**: Billing rule violations such as a negative invoice total
//! - **NotFound**: Unknown claim, procedure or line item
//! - **ConfigError**: Configuration loading and validation failures
//! - **InternalError**: Anything else
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, ErrorContext, RustCareError};
//!
//! fn check_quantity(quantity: i64) -> Result<i64, RustCareError> {
//!     if quantity < 1 {
//!         return Err(RustCareError::ValidationError(
//!             "Quantity must be at least 1".to_string(),
//!         ));
//!     }
//!     Ok(quantity)
//! }
//!
//! let err = check_quantity(0).unwrap_err();
//! assert_eq!(err.code(), codes::validation::INVALID_INPUT);
//!
//! let context = ErrorContext::new("update_quantity").add_context("item_id", "3");
//! error_common::log_error(&context, &err);
//! ```

pub mod types;
pub mod context;
pub mod codes;

pub use types::*;
pub use context::*;
