//! Cost Explorer query construction
//!
//! A [`CostQuery`] carries everything one `GetCostAndUsage` call needs: the
//! window, granularity, metrics, group-bys, and an optional filter. The
//! filter is a small expression tree serialized in the Cost Explorer wire
//! format.
//!
//! "No filtering" is expressed by omitting the filter. [`FilterExpression::all`]
//! is the only way the builder combines terms and it never yields an empty
//! expression.
//!
//! # Examples
//!
//! ```
//! use cestat_core::query::{CostQuery, QueryOptions};
//! use cestat_core::types::{DateRange, ReportKind};
//! use chrono::NaiveDate;
//!
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
//! )
//! .unwrap();
//! let options = QueryOptions::new()
//!     .with_exclude_credits(true)
//!     .with_service("Amazon Simple Storage Service");
//! let query = CostQuery::for_report(ReportKind::MtdServiceDaily, range, &options).unwrap();
//!
//! let filter = serde_json::to_value(query.filter.as_ref().unwrap()).unwrap();
//! assert_eq!(filter["And"].as_array().unwrap().len(), 2);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::{CestatError, Result};
use crate::types::{DateRange, Dimension, Granularity, Metric, ReportKind};

/// Record types removed by `--exclude-credits`
pub const CREDIT_RECORD_TYPES: &[&str] = &["Credit", "Refund"];

/// Dimension key and the values it must match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DimensionValues {
    pub key: Dimension,
    pub values: Vec<String>,
}

/// Cost Explorer filter expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FilterExpression {
    /// Dimension equals one of the values
    Dimensions(DimensionValues),
    /// Negation of the inner expression
    Not(Box<FilterExpression>),
    /// Every inner expression must hold
    And(Vec<FilterExpression>),
}

impl FilterExpression {
    /// `key` equals `value`
    pub fn equals(key: Dimension, value: impl Into<String>) -> Self {
        FilterExpression::Dimensions(DimensionValues {
            key,
            values: vec![value.into()],
        })
    }

    /// `key` is none of `values`
    pub fn excludes<I, S>(key: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterExpression::Not(Box::new(FilterExpression::Dimensions(DimensionValues {
            key,
            values: values.into_iter().map(Into::into).collect(),
        })))
    }

    /// Conjunction of `terms`
    ///
    /// Returns `None` for no terms and the term itself for one, since Cost
    /// Explorer rejects an `And` with fewer than two operands.
    pub fn all(mut terms: Vec<FilterExpression>) -> Option<Self> {
        match terms.len() {
            0 => None,
            1 => terms.pop(),
            _ => Some(FilterExpression::And(terms)),
        }
    }
}

/// Group-by definition in wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupDefinition {
    #[serde(rename = "Type")]
    pub kind: &'static str,
    pub key: Dimension,
}

impl GroupDefinition {
    pub fn dimension(key: Dimension) -> Self {
        Self {
            kind: "DIMENSION",
            key,
        }
    }
}

/// User-selected query modifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Drop credit and refund records
    pub exclude_credits: bool,
    /// Restrict to one service
    pub service: Option<String>,
    /// Metric reported in the cost column
    pub cost_metric: Metric,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            exclude_credits: false,
            service: None,
            cost_metric: Metric::UnblendedCost,
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclude_credits(mut self, exclude: bool) -> Self {
        self.exclude_credits = exclude;
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_cost_metric(mut self, metric: Metric) -> Self {
        self.cost_metric = metric;
        self
    }

    /// Filter implied by these options, if any
    pub fn filter(&self) -> Option<FilterExpression> {
        let mut terms = Vec::with_capacity(2);
        if self.exclude_credits {
            terms.push(FilterExpression::excludes(
                Dimension::RecordType,
                CREDIT_RECORD_TYPES.iter().copied(),
            ));
        }
        if let Some(service) = &self.service {
            terms.push(FilterExpression::equals(Dimension::Service, service.as_str()));
        }
        FilterExpression::all(terms)
    }
}

/// One `GetCostAndUsage` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostQuery {
    #[serde(rename = "TimePeriod", serialize_with = "serialize_time_period")]
    pub range: DateRange,
    pub granularity: Granularity,
    pub metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<GroupDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterExpression>,
}

impl CostQuery {
    /// Build the query for a report preset
    pub fn for_report(kind: ReportKind, range: DateRange, options: &QueryOptions) -> Result<Self> {
        if kind.requires_service() && options.service.is_none() {
            return Err(CestatError::InvalidArgument(format!(
                "{kind} requires --service"
            )));
        }
        if !options.cost_metric.is_cost() {
            return Err(CestatError::InvalidArgument(format!(
                "{} is not a cost metric",
                options.cost_metric
            )));
        }

        let mut metrics = vec![options.cost_metric];
        if kind.includes_usage() {
            metrics.push(Metric::UsageQuantity);
        }

        let query = Self {
            range,
            granularity: kind.granularity(),
            metrics,
            group_by: kind
                .group_by()
                .iter()
                .copied()
                .map(GroupDefinition::dimension)
                .collect(),
            filter: options.filter(),
        };
        debug!(report = %kind, range = %query.range, filtered = query.filter.is_some(), "Built query");
        Ok(query)
    }

    /// Metric shown in the cost column
    pub fn cost_metric(&self) -> Metric {
        self.metrics
            .iter()
            .copied()
            .find(Metric::is_cost)
            .unwrap_or(Metric::UnblendedCost)
    }

    /// Whether usage amounts are requested
    pub fn has_usage(&self) -> bool {
        self.metrics.contains(&Metric::UsageQuantity)
    }

    /// Arguments for `aws ce get-cost-and-usage`
    ///
    /// The leading `ce get-cost-and-usage` is included; global options such
    /// as `--profile` are left to the caller.
    pub fn to_cli_args(&self) -> Result<Vec<String>> {
        let mut args = vec![
            "ce".to_string(),
            "get-cost-and-usage".to_string(),
            "--time-period".to_string(),
            format!(
                "Start={},End={}",
                self.range.start().format("%Y-%m-%d"),
                self.range.end().format("%Y-%m-%d")
            ),
            "--granularity".to_string(),
            self.granularity.to_string(),
            "--metrics".to_string(),
        ];
        args.extend(self.metrics.iter().map(|m| m.to_string()));

        if !self.group_by.is_empty() {
            args.push("--group-by".to_string());
            args.push(serde_json::to_string(&self.group_by)?);
        }
        if let Some(filter) = &self.filter {
            args.push("--filter".to_string());
            args.push(serde_json::to_string(filter)?);
        }

        args.push("--output".to_string());
        args.push("json".to_string());
        Ok(args)
    }
}

fn serialize_time_period<S>(range: &DateRange, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeStruct;

    let mut period = serializer.serialize_struct("DateInterval", 2)?;
    period.serialize_field("Start", &range.start().format("%Y-%m-%d").to_string())?;
    period.serialize_field("End", &range.end().format("%Y-%m-%d").to_string())?;
    period.end()
}
