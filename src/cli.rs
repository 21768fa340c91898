//! CLI interface for cestat
//!
//! This module defines the command-line interface using clap. Every report
//! is a subcommand; the flags are global so they may appear before or after
//! it. There is no default report: running without a subcommand prints usage
//! and fails.
//!
//! # Example
//!
//! ```bash
//! # Daily spend per service for the current month
//! cestat mtd-service-daily
//!
//! # A single day, credits excluded, raw JSON
//! cestat last7-service --start 2025-09-13 --end 2025-09-14 --exclude-credits --json
//!
//! # Usage types behind one service
//! cestat drill-service-usage --service "Amazon Simple Storage Service"
//! ```

use cestat_aws::{AwsCliSource, DEFAULT_AWS_BIN};
use cestat_core::types::{Metric, ReportKind};
use clap::{Parser, Subcommand, ValueEnum};

/// Report AWS Cost Explorer spend
#[derive(Parser, Debug, Clone)]
#[command(name = "cestat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// First day to include (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub start: Option<String>,

    /// First day to exclude (YYYY-MM-DD or YYYY-MM); the end is exclusive
    #[arg(long, global = true)]
    pub end: Option<String>,

    /// Drop credit and refund records
    #[arg(long, global = true)]
    pub exclude_credits: bool,

    /// Restrict to one service, e.g. "Amazon Simple Storage Service"
    #[arg(long, global = true)]
    pub service: Option<String>,

    /// Print the raw Cost Explorer response instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Echo the AWS CLI command and enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Cost metric shown in the cost column
    #[arg(long, value_enum, default_value = "unblended", global = true)]
    pub metric: MetricArg,

    /// AWS named profile
    #[arg(long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// AWS region for the Cost Explorer endpoint
    #[arg(long, env = "AWS_REGION", global = true)]
    pub region: Option<String>,

    /// AWS CLI executable
    #[arg(long, env = "CESTAT_AWS_BIN", default_value = DEFAULT_AWS_BIN, global = true)]
    pub aws_bin: String,

    /// Timezone used to decide today's date (e.g. "Europe/Berlin")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC to decide today's date (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Show informational logs on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Report to run
    #[command(subcommand)]
    pub command: Command,
}

/// Cost metric choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Cost as billed
    Unblended,
    /// Cost with upfront commitments spread over their term
    Amortized,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Unblended => Metric::UnblendedCost,
            MetricArg::Amortized => Metric::AmortizedCost,
        }
    }
}

/// Available reports
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Daily spend per service, month to date
    #[command(name = "mtd-service-daily")]
    MtdServiceDaily,
    /// Daily spend per service over the last seven complete days
    #[command(name = "last7-service")]
    Last7Service,
    /// Daily spend and usage per usage type for one service (requires --service)
    #[command(name = "drill-service-usage")]
    DrillServiceUsage,
    /// Month-to-date total
    #[command(name = "total-mtd")]
    TotalMtd,
}

impl Command {
    pub fn kind(&self) -> ReportKind {
        match self {
            Command::MtdServiceDaily => ReportKind::MtdServiceDaily,
            Command::Last7Service => ReportKind::Last7Service,
            Command::DrillServiceUsage => ReportKind::DrillServiceUsage,
            Command::TotalMtd => ReportKind::TotalMtd,
        }
    }
}

impl Cli {
    /// AWS CLI backend configured from the global flags
    pub fn aws_source(&self) -> AwsCliSource {
        AwsCliSource::new(self.aws_bin.clone())
            .with_profile(self.profile.clone())
            .with_region(self.region.clone())
            .with_echo(self.debug)
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "cestat=debug,cestat_core=debug,cestat_aws=debug,cestat_terminal=debug"
        } else if self.verbose {
            "cestat=info,cestat_core=info,cestat_aws=info,cestat_terminal=info"
        } else {
            "warn"
        }
    }
}
