//! Terminal output formatting for cestat
//!
//! This crate provides the fixed-column text formatter, the raw JSON
//! passthrough, and the spinner shown while a query is in flight.

pub mod output;
pub mod progress;

pub use output::{JsonFormatter, OutputFormatter, TextFormatter, get_formatter};
pub use progress::QuerySpinner;
