//! Billing Service for the medical finance back office
//!
//! Provides the billing calculations behind the invoice and estimate screens:
//! - Invoice subtotal, discount and total computation over line items
//! - Percentage and fixed discounts with collision-free sequential ids
//! - Procedure cost estimates from a base price plus per-variable surcharges
//! - Invoice drafts with payment-method validation
//! - Revenue summaries for the dashboard
//!
//! All amounts are [`rust_decimal::Decimal`]. The calculator and estimator
//! functions are pure; [`BillingService`] layers the configured
//! [`BillingPolicy`] and logging on top of them.

pub mod service;
pub mod models;
pub mod calculator;
pub mod estimator;
pub mod catalog;
pub mod invoice;
pub mod policy;
pub mod reporting;
pub mod error;

pub use service::*;
pub use models::*;
pub use calculator::*;
pub use estimator::*;
pub use catalog::*;
pub use invoice::*;
pub use policy::*;
pub use reporting::*;
pub use error::*;
