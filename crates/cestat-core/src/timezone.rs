//! Calendar used to decide what "today" is
//!
//! Default date windows (month to date, trailing seven days) are anchored on
//! the current day. Cost Explorer buckets by UTC day, but users usually think
//! in their own calendar, so the zone is configurable.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CestatError, Result};

/// Zone in which the current date is evaluated
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// The zone used to compute "today"
    pub tz: Tz,
    /// Whether the zone is UTC
    pub is_utc: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        let tz = detect_local_timezone();
        Self {
            is_utc: tz == Tz::UTC,
            tz,
        }
    }
}

impl TimezoneConfig {
    /// Resolve the zone from `--utc` and `--timezone`
    ///
    /// `--utc` wins over `--timezone`; with neither, the local zone is
    /// detected.
    pub fn from_cli(timezone: Option<&str>, use_utc: bool) -> Result<Self> {
        if use_utc {
            return Ok(Self::utc());
        }

        match timezone {
            Some(name) => {
                let tz = Tz::from_str(name).map_err(|_| {
                    CestatError::InvalidTimezone(format!(
                        "'{name}'. Use an IANA name such as 'Europe/Berlin' or 'UTC'"
                    ))
                })?;
                Ok(Self {
                    tz,
                    is_utc: tz == Tz::UTC,
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// UTC calendar
    pub fn utc() -> Self {
        Self {
            tz: Tz::UTC,
            is_utc: true,
        }
    }

    /// Display name for logs
    pub fn display_name(&self) -> &str {
        if self.is_utc { "UTC" } else { self.tz.name() }
    }

    /// Current date in this zone
    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }

    /// Calendar date of `instant` in this zone
    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }
}

/// Detect the system's local timezone
///
/// Checks `TZ` first, then asks the platform through `iana-time-zone`, and
/// falls back to UTC when neither yields a known zone.
pub fn detect_local_timezone() -> Tz {
    if let Some(tz) = std::env::var("TZ")
        .ok()
        .and_then(|name| Tz::from_str(&name).ok())
    {
        debug!(tz = %tz, "Using timezone from TZ");
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => Tz::from_str(&name).unwrap_or_else(|_| {
            debug!(name = %name, "Unknown system timezone, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            debug!(error = ?e, "Could not detect system timezone, using UTC");
            Tz::UTC
        }
    }
}
