//! Core domain types for cestat
//!
//! This module contains the fundamental types shared by the query builder,
//! the response parser, and the formatters: billing metrics, group-by
//! dimensions, date ranges, report presets, and printable report rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CestatError, Result};

/// Time-bucketing unit for a billing query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    /// One bucket per day
    Daily,
    /// One bucket per calendar month
    Monthly,
}

impl Granularity {
    /// Wire name used by Cost Explorer
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "DAILY",
            Granularity::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing metric requested from Cost Explorer
///
/// Unblended and amortized cost describe the same usage; they differ in how
/// upfront reservation and savings plan fees are spread over time.
///
/// # Examples
/// ```
/// use cestat_core::types::Metric;
///
/// assert_eq!(Metric::UnblendedCost.as_str(), "UnblendedCost");
/// assert!(Metric::AmortizedCost.is_cost());
/// assert!(!Metric::UsageQuantity.is_cost());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Cost as billed, without spreading upfront fees
    UnblendedCost,
    /// Cost with upfront fees spread across the commitment term
    AmortizedCost,
    /// Raw usage amount in the service's own unit
    UsageQuantity,
}

impl Metric {
    /// Wire name used by Cost Explorer, also the key in response `Metrics` maps
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::UnblendedCost => "UnblendedCost",
            Metric::AmortizedCost => "AmortizedCost",
            Metric::UsageQuantity => "UsageQuantity",
        }
    }

    /// Whether the metric is a monetary amount
    pub fn is_cost(&self) -> bool {
        !matches!(self, Metric::UsageQuantity)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named billing attribute used for grouping and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    /// AWS service, e.g. "Amazon Simple Storage Service"
    Service,
    /// Usage type, e.g. "USE1-TimedStorage-ByteHrs"
    UsageType,
    /// Charge record type, e.g. "Usage", "Credit", "Refund"
    RecordType,
    /// Member account in an organization
    LinkedAccount,
    /// AWS region
    Region,
}

impl Dimension {
    /// Wire name used by Cost Explorer
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Service => "SERVICE",
            Dimension::UsageType => "USAGE_TYPE",
            Dimension::RecordType => "RECORD_TYPE",
            Dimension::LinkedAccount => "LINKED_ACCOUNT",
            Dimension::Region => "REGION",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query window with an inclusive start and an exclusive end
///
/// # Examples
/// ```
/// use cestat_core::types::DateRange;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 9, 13).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 9, 14).unwrap();
/// let range = DateRange::new(start, end).unwrap();
/// assert_eq!(range.days(), 1);
/// assert!(range.contains(start));
/// assert!(!range.contains(end));
///
/// assert!(DateRange::new(end, start).is_err());
/// ```
///
/// `new` is the only way to build one:
/// ```compile_fail
/// use cestat_core::types::DateRange;
///
/// let _: DateRange = serde_json::from_str(r#"{"start":"2025-09-14","end":"2025-09-13"}"#).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting empty or inverted windows
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start >= end {
            return Err(CestatError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive first day
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive last day
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether `date` falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} (exclusive)",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Default window a report uses when no dates are given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultWindow {
    /// First of the current month through today
    MonthToDate,
    /// The seven complete days before today
    Trailing7Days,
}

/// Report presets exposed as subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Daily spend per service, month to date
    MtdServiceDaily,
    /// Daily spend per service over the last seven days
    Last7Service,
    /// Daily spend and usage per usage type for one service
    DrillServiceUsage,
    /// Single month-to-date total
    TotalMtd,
}

impl ReportKind {
    /// Subcommand name
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::MtdServiceDaily => "mtd-service-daily",
            ReportKind::Last7Service => "last7-service",
            ReportKind::DrillServiceUsage => "drill-service-usage",
            ReportKind::TotalMtd => "total-mtd",
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            ReportKind::TotalMtd => Granularity::Monthly,
            _ => Granularity::Daily,
        }
    }

    pub fn group_by(&self) -> &'static [Dimension] {
        match self {
            ReportKind::MtdServiceDaily | ReportKind::Last7Service => &[Dimension::Service],
            ReportKind::DrillServiceUsage => &[Dimension::Service, Dimension::UsageType],
            ReportKind::TotalMtd => &[],
        }
    }

    /// Whether the report also requests `UsageQuantity`
    pub fn includes_usage(&self) -> bool {
        matches!(self, ReportKind::DrillServiceUsage)
    }

    /// Whether `--service` is mandatory
    pub fn requires_service(&self) -> bool {
        matches!(self, ReportKind::DrillServiceUsage)
    }

    pub fn default_window(&self) -> DefaultWindow {
        match self {
            ReportKind::Last7Service => DefaultWindow::Trailing7Days,
            _ => DefaultWindow::MonthToDate,
        }
    }

    /// Label printed for a time bucket that came back without groups
    pub fn sentinel_label(&self) -> &'static str {
        match self {
            ReportKind::TotalMtd => "TOTAL",
            _ => "(no usage)",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One printable line of a report
///
/// Amount fields hold the API's strings exactly as returned; they are never
/// parsed into floats so no precision is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Bucket start date as returned (YYYY-MM-DD)
    pub date: String,
    /// Group label, or the report's sentinel label
    pub label: String,
    /// Cost amount, empty when absent
    pub cost: String,
    /// Usage amount, empty when absent or not requested
    pub usage_amount: String,
    /// Usage unit, empty when absent or not requested
    pub usage_unit: String,
}
