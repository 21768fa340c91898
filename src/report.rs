//! Report pipeline
//!
//! Resolve the date window, build one query, fetch it, format it. The whole
//! run is a single request/response cycle; any error aborts before anything
//! is printed.

use cestat_core::dates::{parse_date_arg, resolve_range};
use cestat_core::error::Result;
use cestat_core::query::{CostQuery, QueryOptions};
use cestat_core::response::RowLayout;
use cestat_core::source::CostSource;
use cestat_core::types::{Metric, ReportKind};
use cestat_terminal::{OutputFormatter, QuerySpinner, get_formatter};
use chrono::NaiveDate;
use tracing::info;

use crate::cli::Cli;

/// Everything one report run needs, independent of how it was invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub options: QueryOptions,
    /// Raw JSON passthrough
    pub json: bool,
    /// Bold table header
    pub color: bool,
    /// Spinner on stderr while waiting
    pub spinner: bool,
}

impl ReportRequest {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            start: None,
            end: None,
            options: QueryOptions::new(),
            json: false,
            color: false,
            spinner: false,
        }
    }

    /// Build a request from parsed arguments
    ///
    /// `stdout_tty` and `stderr_tty` decide whether the header is bold and
    /// whether a spinner is drawn.
    pub fn from_cli(cli: &Cli, stdout_tty: bool, stderr_tty: bool) -> Result<Self> {
        let start = cli.start.as_deref().map(parse_date_arg).transpose()?;
        let end = cli.end.as_deref().map(parse_date_arg).transpose()?;

        let mut options = QueryOptions::new()
            .with_exclude_credits(cli.exclude_credits)
            .with_cost_metric(Metric::from(cli.metric));
        if let Some(service) = &cli.service {
            options = options.with_service(service.clone());
        }

        Ok(Self {
            kind: cli.command.kind(),
            start,
            end,
            options,
            json: cli.json,
            color: stdout_tty && !cli.json,
            spinner: stderr_tty && !cli.json && !cli.debug,
        })
    }

    /// Query this request resolves to, with `today` anchoring default windows
    pub fn query(&self, today: NaiveDate) -> Result<CostQuery> {
        let range = resolve_range(self.kind, self.start, self.end, today)?;
        CostQuery::for_report(self.kind, range, &self.options)
    }
}

/// Run a report against `source` and return the text to print
pub async fn run_report<S>(source: &S, request: &ReportRequest, today: NaiveDate) -> Result<String>
where
    S: CostSource + ?Sized,
{
    let query = request.query(today)?;
    info!(report = %request.kind, range = %query.range, "Querying Cost Explorer");

    let spinner = QuerySpinner::start(request.spinner, format!("Querying Cost Explorer ({})", request.kind));
    let fetched = source.fetch(&query).await;
    spinner.finish();
    let raw = fetched?;

    let layout = RowLayout::for_report(request.kind, &query);
    get_formatter(request.json, request.color).format_report(&raw, &layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cestat_core::CestatError;
    use clap::Parser;
    use std::sync::Mutex;

    /// Returns a canned document and records the queries it saw
    struct CannedSource {
        raw: String,
        seen: Mutex<Vec<CostQuery>>,
    }

    impl CannedSource {
        fn new(raw: &str) -> Self {
            Self {
                raw: raw.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CostSource for CannedSource {
        async fn fetch(&self, query: &CostQuery) -> Result<String> {
            self.seen.lock().unwrap().push(query.clone());
            Ok(self.raw.clone())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()
    }

    #[test]
    fn test_request_from_cli() {
        let cli = Cli::parse_from([
            "cestat",
            "last7-service",
            "--start",
            "2025-09-13",
            "--end",
            "2025-09-14",
            "--service",
            "Amazon S3",
        ]);
        let request = ReportRequest::from_cli(&cli, true, true).unwrap();
        assert_eq!(request.kind, ReportKind::Last7Service);
        assert_eq!(request.start, NaiveDate::from_ymd_opt(2025, 9, 13));
        assert_eq!(request.options.service.as_deref(), Some("Amazon S3"));
        assert!(request.color);
        assert!(request.spinner);
    }

    #[test]
    fn test_json_disables_decoration() {
        let cli = Cli::parse_from(["cestat", "total-mtd", "--json"]);
        let request = ReportRequest::from_cli(&cli, true, true).unwrap();
        assert!(!request.color);
        assert!(!request.spinner);
    }

    #[test]
    fn test_bad_date_argument() {
        let cli = Cli::parse_from(["cestat", "total-mtd", "--start", "last-week"]);
        let err = ReportRequest::from_cli(&cli, false, false).unwrap_err();
        assert!(matches!(err, CestatError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn test_run_report_text() {
        let source = CannedSource::new(
            r#"{"ResultsByTime":[{"TimePeriod":{"Start":"2025-09-13"},"Groups":[{"Keys":["Amazon S3"],"Metrics":{"UnblendedCost":{"Amount":"0.0001662"}}}]}]}"#,
        );
        let mut request = ReportRequest::new(ReportKind::MtdServiceDaily);
        request.start = NaiveDate::from_ymd_opt(2025, 9, 13);
        request.end = NaiveDate::from_ymd_opt(2025, 9, 14);

        let output = run_report(&source, &request, today()).await.unwrap();
        assert!(output.contains("$0.0001662"));

        let seen = source.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].range.days(), 1);
    }

    #[tokio::test]
    async fn test_drill_without_service_never_fetches() {
        let source = CannedSource::new("{}");
        let request = ReportRequest::new(ReportKind::DrillServiceUsage);
        let err = run_report(&source, &request, today()).await.unwrap_err();
        assert!(matches!(err, CestatError::InvalidArgument(_)));
        assert!(source.seen.lock().unwrap().is_empty());
    }
}
