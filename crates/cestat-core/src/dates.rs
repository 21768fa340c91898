//! Date argument parsing and default window resolution
//!
//! `--start` and `--end` accept `YYYY-MM-DD` or `YYYY-MM`. A month means its
//! first day, which reads naturally for both bounds since the end is
//! exclusive: `--start 2025-08 --end 2025-09` covers all of August.
//!
//! # Example
//!
//! ```
//! use cestat_core::dates::resolve_range;
//! use cestat_core::types::ReportKind;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 9, 14).unwrap();
//! let range = resolve_range(ReportKind::TotalMtd, None, None, today).unwrap();
//! assert_eq!(range.start(), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
//! assert_eq!(range.end(), NaiveDate::from_ymd_opt(2025, 9, 15).unwrap());
//! ```

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::error::{CestatError, Result};
use crate::types::{DateRange, DefaultWindow, ReportKind};

/// Parse a date argument
///
/// # Example
///
/// ```
/// use cestat_core::dates::parse_date_arg;
/// use chrono::Datelike;
///
/// let date = parse_date_arg("2025-09-13").unwrap();
/// assert_eq!(date.day(), 13);
///
/// let date = parse_date_arg("2025-09").unwrap();
/// assert_eq!(date.day(), 1);
///
/// assert!(parse_date_arg("yesterday").is_err());
/// ```
pub fn parse_date_arg(value: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    let Some((year, month)) = value.split_once('-') else {
        return Err(CestatError::InvalidDate(format!(
            "'{value}', expected YYYY-MM-DD or YYYY-MM"
        )));
    };
    let year = year
        .parse::<i32>()
        .map_err(|_| CestatError::InvalidDate(format!("invalid year in '{value}'")))?;
    let month = month
        .parse::<u32>()
        .map_err(|_| CestatError::InvalidDate(format!("invalid month in '{value}'")))?;
    if !(1..=12).contains(&month) {
        return Err(CestatError::InvalidDate(format!(
            "month must be between 1-12, got {month}"
        )));
    }

    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CestatError::InvalidDate(format!("'{value}' is out of range")))
}

/// Default window for `window`, anchored on `today`
pub fn default_range(window: DefaultWindow, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match window {
        // Tomorrow as the exclusive end keeps today's partial spend in view
        // and keeps the window non-empty on the first of the month.
        DefaultWindow::MonthToDate => (first_of_month(today), day_after(today)),
        DefaultWindow::Trailing7Days => (today - Days::new(7), today),
    }
}

/// Build the query window from optional explicit bounds
///
/// A missing bound falls back to the report's default; the result must be
/// non-empty.
pub fn resolve_range(
    kind: ReportKind,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateRange> {
    let (default_start, default_end) = default_range(kind.default_window(), today);
    let start = start.unwrap_or(default_start);
    let end = end.unwrap_or(default_end);
    debug!(report = %kind, %start, %end, "Resolved date range");
    DateRange::new(start, end)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn day_after(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}
