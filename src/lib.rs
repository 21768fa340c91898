//! cestat - report AWS Cost Explorer spend from the command line
//!
//! This library provides functionality to:
//! - Resolve report subcommands and flags into a Cost Explorer query
//! - Run the query through the AWS CLI
//! - Render the response as a fixed-column table or pass it through as JSON
//!
//! # Examples
//!
//! ```no_run
//! use cestat::report::{ReportRequest, run_report};
//! use cestat_aws::AwsCliSource;
//! use cestat_core::timezone::TimezoneConfig;
//! use cestat_core::types::ReportKind;
//!
//! #[tokio::main]
//! async fn main() -> cestat::Result<()> {
//!     let source = AwsCliSource::default();
//!     let request = ReportRequest::new(ReportKind::TotalMtd);
//!     let today = TimezoneConfig::utc().today();
//!
//!     println!("{}", run_report(&source, &request, today).await?);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod report;

// Re-export commonly used types
pub use cestat_core::{CestatError, ReportKind, Result};
