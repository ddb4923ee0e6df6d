//! Configuration management for the RustCare billing engine
//!
//! Configuration is assembled from three layers:
//! - serde defaults of the target type
//! - an optional YAML file
//! - prefixed environment variables
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::ConfigLoader;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct AppConfig {
//!     log_level: String,
//! }
//!
//! let config: AppConfig = ConfigLoader::new("RUSTCARE_")
//!     .with_file("rustcare.yaml")
//!     .load()
//!     .expect("configuration");
//! println!("{:?}", config);
//! ```

pub mod providers;
pub mod validation;
pub mod error;

pub use providers::*;
pub use validation::*;
pub use error::*;
