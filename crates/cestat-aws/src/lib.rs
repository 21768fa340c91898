//! AWS CLI backed cost source for cestat
//!
//! This crate implements the `CostSource` trait by running
//! `aws ce get-cost-and-usage`, leaving credentials, request signing, and
//! region resolution to the AWS CLI.

pub mod cli_source;

pub use cli_source::{AwsCliSource, DEFAULT_AWS_BIN};
