//! Output formatting module for cestat
//!
//! This module provides formatters for displaying a Cost Explorer response:
//! - Text format: fixed-width columns for reading in a terminal
//! - JSON format: the raw API response, passed through untouched
//!
//! # Examples
//!
//! ```
//! use cestat_core::response::RowLayout;
//! use cestat_core::types::Metric;
//! use cestat_terminal::output::get_formatter;
//!
//! let raw = r#"{"ResultsByTime":[{"TimePeriod":{"Start":"2025-09-13"},"Groups":[
//!     {"Keys":["Amazon S3"],"Metrics":{"UnblendedCost":{"Amount":"0.0001662"}}}
//! ]}]}"#;
//! let layout = RowLayout::new(Metric::UnblendedCost, "(no usage)");
//!
//! let text = get_formatter(false, false).format_report(raw, &layout).unwrap();
//! assert!(text.contains("$0.0001662"));
//!
//! let json = get_formatter(true, false).format_report(raw, &layout).unwrap();
//! assert_eq!(json, raw);
//! ```

use cestat_core::error::{CestatError, Result};
use cestat_core::response::{RowLayout, parse_response, rows_from_response};
use cestat_core::types::ReportRow;
use colored::Colorize;
use tracing::debug;

/// Width of the date column
pub const DATE_WIDTH: usize = 10;
/// Width of the group label column; longer labels push the row, never truncate
pub const LABEL_WIDTH: usize = 48;
/// Width of the cost and usage amount columns
pub const AMOUNT_WIDTH: usize = 16;
/// Marker prefixed to every non-empty cost
pub const CURRENCY_MARKER: &str = "$";

const COLUMN_GAP: &str = "  ";

/// Trait for output formatters
///
/// Implementations turn the raw `GetCostAndUsage` document into the text that
/// is printed on stdout.
///
/// # Example Implementation
///
/// ```
/// use cestat_core::Result;
/// use cestat_core::response::{RowLayout, parse_response};
/// use cestat_terminal::output::OutputFormatter;
///
/// struct BucketCounter;
///
/// impl OutputFormatter for BucketCounter {
///     fn format_report(&self, raw: &str, _layout: &RowLayout) -> Result<String> {
///         let response = parse_response(raw)?;
///         Ok(format!("{} buckets", response.results_by_time.len()))
///     }
/// }
/// ```
pub trait OutputFormatter {
    /// Render a raw API response
    fn format_report(&self, raw: &str, layout: &RowLayout) -> Result<String>;
}

/// Fixed-column text formatter
///
/// Amounts are printed exactly as returned by the API, prefixed with `$`.
pub struct TextFormatter {
    /// Bold header when writing to a terminal
    pub color: bool,
}

impl TextFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Prefix a non-empty amount with the currency marker
    pub fn format_currency(amount: &str) -> String {
        if amount.is_empty() {
            String::new()
        } else {
            format!("{CURRENCY_MARKER}{amount}")
        }
    }

    fn header(&self, include_usage: bool) -> String {
        let mut line = format!(
            "{:<DATE_WIDTH$}{COLUMN_GAP}{:<LABEL_WIDTH$}{COLUMN_GAP}{:>AMOUNT_WIDTH$}",
            "Date", "Group", "Cost"
        );
        if include_usage {
            line.push_str(&format!(
                "{COLUMN_GAP}{:>AMOUNT_WIDTH$}{COLUMN_GAP}{}",
                "Usage", "Unit"
            ));
        }
        if self.color {
            line.bold().to_string()
        } else {
            line
        }
    }

    /// Render one row
    pub fn format_row(row: &ReportRow, include_usage: bool) -> String {
        let mut line = format!(
            "{:<DATE_WIDTH$}{COLUMN_GAP}{:<LABEL_WIDTH$}{COLUMN_GAP}{:>AMOUNT_WIDTH$}",
            row.date,
            row.label,
            Self::format_currency(&row.cost)
        );
        if include_usage {
            line.push_str(&format!(
                "{COLUMN_GAP}{:>AMOUNT_WIDTH$}{COLUMN_GAP}{}",
                row.usage_amount, row.usage_unit
            ));
        }
        line.trim_end().to_string()
    }

    /// Render rows under a header
    pub fn format_rows(&self, rows: &[ReportRow], include_usage: bool) -> String {
        let mut output = self.header(include_usage);
        for row in rows {
            output.push('\n');
            output.push_str(&Self::format_row(row, include_usage));
        }
        output
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, raw: &str, layout: &RowLayout) -> Result<String> {
        let response = parse_response(raw)?;
        let rows = rows_from_response(&response, layout);
        debug!(rows = rows.len(), "Formatting text report");
        Ok(self.format_rows(&rows, layout.include_usage))
    }
}

/// Raw JSON passthrough
///
/// The document is not parsed, so this is also the way to inspect a
/// response the text formatter rejects.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, raw: &str, _layout: &RowLayout) -> Result<String> {
        // Unparseable text still passes through; nothing at all does not
        if raw.trim().is_empty() {
            return Err(CestatError::EmptyResponse);
        }
        Ok(raw.trim_end().to_string())
    }
}

/// Get the appropriate formatter based on output format preference
///
/// # Arguments
///
/// * `json` - pass the raw response through instead of building a table
/// * `color` - bold the text header
pub fn get_formatter(json: bool, color: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TextFormatter::new(color))
    }
}
