//! Configuration loading and management for the IRPF engine.
//!
//! This module loads engine settings from YAML and parses the YAML or JSON
//! documents rate tables are stored in.
//!
//! # Example
//!
//! ```no_run
//! use irpf_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Payment periods: {}", config.settings().payment_periods.count());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DOCUMENT_EXTENSIONS, parse_document};
pub use types::EngineSettings;
