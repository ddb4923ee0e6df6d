//! `rustcare` command line for the billing back office
//!
//! Wraps the billing and insurance services behind a small set of commands:
//! - `invoice`: edit the seeded invoice draft, show totals, issue the invoice
//! - `estimate`: price a procedure for a set of option choices
//! - `procedures`: list the procedure catalog
//! - `claims`: search and filter insurance claims
//! - `dashboard`: revenue summary and recent activity
//!
//! Configuration is layered from defaults, `rustcare.yaml` and `RUSTCARE_*`
//! environment variables (see [`config::AppConfig`]). Every command can emit
//! JSON with `--json`.

pub mod cli;
pub mod commands;
pub mod config;
