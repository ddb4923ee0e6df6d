//! Insurance Service for the medical finance back office
//!
//! Provides the claims view of the billing dashboard:
//! - Seed registry of submitted insurance claims
//! - Case-insensitive claim search
//! - Filtering by claim status
//! - Claim counts, amounts and approval rate
//!
//! Patient names and policy numbers are pseudonymized or redacted before
//! they appear in log output.

pub mod service;
pub mod models;
pub mod error;

pub use service::*;
pub use models::*;
pub use error::*;
