//! `GetCostAndUsage` response model and row derivation
//!
//! The response is parsed leniently: only `ResultsByTime` and each bucket's
//! `TimePeriod.Start` are required, everything else defaults to empty. Amount
//! strings are kept exactly as returned.
//!
//! # Example
//!
//! ```
//! use cestat_core::response::{RowLayout, parse_response, rows_from_response};
//! use cestat_core::types::Metric;
//!
//! let raw = r#"{"ResultsByTime":[{"TimePeriod":{"Start":"2025-09-13"},"Groups":[
//!     {"Keys":["Amazon S3"],"Metrics":{"UnblendedCost":{"Amount":"0.0001662"}}}
//! ]}]}"#;
//! let response = parse_response(raw).unwrap();
//! let rows = rows_from_response(&response, &RowLayout::new(Metric::UnblendedCost, "(no usage)"));
//! assert_eq!(rows[0].label, "Amazon S3");
//! assert_eq!(rows[0].cost, "0.0001662");
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{CestatError, Result};
use crate::query::CostQuery;
use crate::types::{Metric, ReportKind, ReportRow};

/// Separator between group keys in a label
pub const KEY_SEPARATOR: &str = " / ";

/// Top-level `GetCostAndUsage` document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAndUsageResponse {
    pub results_by_time: Vec<ResultByTime>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// One time bucket
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultByTime {
    pub time_period: TimePeriod,
    #[serde(default)]
    pub total: BTreeMap<String, MetricValue>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimePeriod {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

/// Breakdown for one combination of group keys
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricValue>,
}

/// Amount and unit pair; either side may be absent or null
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl ResultByTime {
    fn metric(&self, metric: Metric) -> Option<&MetricValue> {
        self.total.get(metric.as_str())
    }
}

impl Group {
    fn metric(&self, metric: Metric) -> Option<&MetricValue> {
        self.metrics.get(metric.as_str())
    }
}

/// Parse raw API output
///
/// Whitespace-only input is [`CestatError::EmptyResponse`]; anything that is
/// not a cost-and-usage document is [`CestatError::MalformedResponse`].
pub fn parse_response(raw: &str) -> Result<CostAndUsageResponse> {
    if raw.trim().is_empty() {
        return Err(CestatError::EmptyResponse);
    }
    let response: CostAndUsageResponse = serde_json::from_str(raw)
        .map_err(|e| CestatError::MalformedResponse(e.to_string()))?;

    if response.next_page_token.is_some() {
        warn!("Cost Explorer returned a NextPageToken; only the first page is shown");
    }
    debug!(buckets = response.results_by_time.len(), "Parsed response");
    Ok(response)
}

/// How buckets and groups map onto report rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    /// Metric read into the cost column
    pub cost_metric: Metric,
    /// Whether to read `UsageQuantity` into the usage columns
    pub include_usage: bool,
    /// Label for buckets without groups
    pub sentinel_label: String,
    /// Show only the last group key
    pub last_key_only: bool,
}

impl RowLayout {
    pub fn new(cost_metric: Metric, sentinel_label: impl Into<String>) -> Self {
        Self {
            cost_metric,
            include_usage: false,
            sentinel_label: sentinel_label.into(),
            last_key_only: false,
        }
    }

    pub fn with_usage(mut self, include: bool) -> Self {
        self.include_usage = include;
        self
    }

    pub fn with_last_key_only(mut self, last_only: bool) -> Self {
        self.last_key_only = last_only;
        self
    }

    /// Layout for a report and the query issued for it
    ///
    /// The drill-down fixes the service through its filter, so its first key
    /// is redundant and only the usage type is shown.
    pub fn for_report(kind: ReportKind, query: &CostQuery) -> Self {
        Self::new(query.cost_metric(), kind.sentinel_label())
            .with_usage(query.has_usage())
            .with_last_key_only(query.group_by.len() > 1 && kind.requires_service())
    }

    fn label(&self, keys: &[String]) -> String {
        if self.last_key_only {
            keys.last().cloned().unwrap_or_default()
        } else {
            keys.join(KEY_SEPARATOR)
        }
    }
}

/// Flatten a response into printable rows
///
/// A bucket with N groups yields N rows in API order. A bucket with no
/// groups yields one sentinel row carrying the bucket total and empty usage.
pub fn rows_from_response(response: &CostAndUsageResponse, layout: &RowLayout) -> Vec<ReportRow> {
    let mut rows = Vec::new();

    for bucket in &response.results_by_time {
        let date = bucket.time_period.start.clone();

        if bucket.groups.is_empty() {
            rows.push(ReportRow {
                date,
                label: layout.sentinel_label.clone(),
                cost: amount_of(bucket.metric(layout.cost_metric)),
                usage_amount: String::new(),
                usage_unit: String::new(),
            });
            continue;
        }

        for group in &bucket.groups {
            let (usage_amount, usage_unit) = if layout.include_usage {
                let usage = group.metric(Metric::UsageQuantity);
                (amount_of(usage), unit_of(usage))
            } else {
                (String::new(), String::new())
            };

            rows.push(ReportRow {
                date: date.clone(),
                label: layout.label(&group.keys),
                cost: amount_of(group.metric(layout.cost_metric)),
                usage_amount,
                usage_unit,
            });
        }
    }

    rows
}

fn amount_of(value: Option<&MetricValue>) -> String {
    value.and_then(|v| v.amount.clone()).unwrap_or_default()
}

fn unit_of(value: Option<&MetricValue>) -> String {
    value.and_then(|v| v.unit.clone()).unwrap_or_default()
}
