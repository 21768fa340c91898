//! Error types for cestat
//!
//! This module defines the error types used throughout the cestat crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use cestat_core::error::{CestatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to CestatError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use thiserror::Error;

/// Hint appended to every response error
const RAW_OUTPUT_HINT: &str = "re-run with --json --debug to inspect the raw response";

/// Main error type for cestat operations
///
/// This enum encompasses everything that can go wrong between argument
/// resolution and printing a report.
#[derive(Error, Debug)]
pub enum CestatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Start is not strictly before the exclusive end
    #[error("Invalid date range: start {start} must be before end {end} (end is exclusive)")]
    InvalidDateRange {
        /// Inclusive start
        start: NaiveDate,
        /// Exclusive end
        end: NaiveDate,
    },

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Required external tool is not installed
    #[error("Missing dependency: '{0}' was not found on PATH")]
    MissingDependency(String),

    /// The external API client exited with a failure
    #[error("Cost Explorer call failed (exit code {code}): {stderr}")]
    ApiCall {
        /// Exit code of the client process
        code: i32,
        /// Captured stderr, verbatim
        stderr: String,
    },

    /// The API returned nothing
    #[error("Empty response from Cost Explorer; {}", RAW_OUTPUT_HINT)]
    EmptyResponse,

    /// The API returned something that is not a cost-and-usage document
    #[error("Malformed response from Cost Explorer ({}); {}", .0, RAW_OUTPUT_HINT)]
    MalformedResponse(String),
}

impl CestatError {
    /// Process exit code for this error
    ///
    /// Usage errors are reported by clap with its own code (2), so they
    /// never reach this mapping.
    pub fn exit_code(&self) -> u8 {
        match self {
            CestatError::MissingDependency(_) => 127,
            _ => 1,
        }
    }
}

/// Convenience type alias for Results in cestat
///
/// # Example
///
/// ```
/// use cestat_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CestatError>;
