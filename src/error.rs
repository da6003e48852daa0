//! Error types for the IRPF engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate tables or
//! running salary calculations.

use thiserror::Error;

/// The main error type for the IRPF engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use irpf_engine::error::EngineError;
///
/// let error = EngineError::RatesNotFound {
///     region: "catalunya".to_string(),
///     year: "2019".to_string(),
/// };
/// assert_eq!(error.to_string(), "No rate tables found for region 'catalunya' and year 2019");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A calculation was requested before any rate tables were loaded,
    /// or after the last load failed.
    #[error("Tax data is not loaded")]
    ContextNotLoaded,

    /// A salary segment crossed a year boundary or ended before it started.
    #[error("Invalid salary segment {index}: {message}")]
    InvalidSegment {
        /// The position of the offending segment in the input list.
        index: usize,
        /// A description of what made the segment invalid.
        message: String,
    },

    /// A payment-period count other than 12 or 14 was requested.
    #[error("Unsupported number of payment periods: {value} (expected 12 or 14)")]
    InvalidPaymentPeriods {
        /// The rejected value.
        value: u8,
    },

    /// A loaded bracket table or flat-rate record violated its invariants.
    #[error("Invalid rate table: {message}")]
    InvalidRateTable {
        /// A description of the violated invariant.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The store holds no tables for the requested region and year.
    #[error("No rate tables found for region '{region}' and year {year}")]
    RatesNotFound {
        /// The requested region.
        region: String,
        /// The requested year.
        year: String,
    },

    /// Loading the tables took longer than the configured timeout.
    #[error("Loading rate tables for region '{region}' and year {year} timed out after {timeout_ms}ms")]
    LoadTimeout {
        /// The requested region.
        region: String,
        /// The requested year.
        year: String,
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
