//! Core types, query model, and response parsing for cestat
//!
//! This crate provides the foundational types, error handling,
//! date resolution, Cost Explorer query construction, and response
//! row derivation used by all other cestat crates.

pub mod dates;
pub mod error;
pub mod query;
pub mod response;
pub mod source;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{CestatError, Result};
pub use source::CostSource;
pub use types::{DateRange, Dimension, Granularity, Metric, ReportKind, ReportRow};
