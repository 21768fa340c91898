//! Common test utilities and helpers for cestat tests
//!
//! This module provides response builders, an in-memory cost source, and a
//! fake `aws` executable for end-to-end runs.

#![allow(dead_code)]

use async_trait::async_trait;
use cestat_core::Result;
use cestat_core::query::CostQuery;
use cestat_core::source::CostSource;
use once_cell::sync::Lazy;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

// Global mutex to serialize environment variable modifications in tests
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

// Serializes writing fake executables with spawning processes. A fork taken
// while another thread still holds a script open for writing makes exec of
// that script fail with ETXTBSY.
pub static SPAWN_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Hold [`SPAWN_MUTEX`] for the rest of a test, ignoring poison from failed tests
pub fn serial_spawn() -> MutexGuard<'static, ()> {
    SPAWN_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

/// Builder for one `ResultsByTime` bucket
pub struct BucketBuilder {
    start: String,
    end: Option<String>,
    total: Option<String>,
    groups: Vec<Value>,
}

impl BucketBuilder {
    pub fn new(start: &str) -> Self {
        Self {
            start: start.to_string(),
            end: None,
            total: None,
            groups: Vec::new(),
        }
    }

    pub fn with_end(mut self, end: &str) -> Self {
        self.end = Some(end.to_string());
        self
    }

    pub fn with_total(mut self, amount: &str) -> Self {
        self.total = Some(amount.to_string());
        self
    }

    pub fn with_group(mut self, keys: &[&str], cost: &str) -> Self {
        self.groups.push(json!({
            "Keys": keys,
            "Metrics": {"UnblendedCost": {"Amount": cost, "Unit": "USD"}}
        }));
        self
    }

    pub fn with_usage_group(mut self, keys: &[&str], cost: &str, usage: &str, unit: &str) -> Self {
        self.groups.push(json!({
            "Keys": keys,
            "Metrics": {
                "UnblendedCost": {"Amount": cost, "Unit": "USD"},
                "UsageQuantity": {"Amount": usage, "Unit": unit}
            }
        }));
        self
    }

    pub fn build(self) -> Value {
        let mut period = json!({"Start": self.start});
        if let Some(end) = self.end {
            period["End"] = json!(end);
        }
        let total = match self.total {
            Some(amount) => json!({"UnblendedCost": {"Amount": amount, "Unit": "USD"}}),
            None => json!({}),
        };
        json!({
            "TimePeriod": period,
            "Total": total,
            "Groups": self.groups,
            "Estimated": true
        })
    }
}

/// Wrap buckets into a full response document
pub fn response(buckets: Vec<BucketBuilder>) -> String {
    json!({
        "ResultsByTime": buckets.into_iter().map(BucketBuilder::build).collect::<Vec<_>>(),
        "DimensionValueAttributes": []
    })
    .to_string()
}

/// The single-row document used as the reference example
pub const S3_EXAMPLE: &str = r#"{"ResultsByTime":[{"TimePeriod":{"Start":"2025-09-13"},"Groups":[{"Keys":["Amazon S3"],"Metrics":{"UnblendedCost":{"Amount":"0.0001662"}}}]}]}"#;

/// In-memory source returning a fixed document
pub struct CannedSource {
    raw: String,
    seen: Mutex<Vec<CostQuery>>,
}

impl CannedSource {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<CostQuery> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CostSource for CannedSource {
    async fn fetch(&self, query: &CostQuery) -> Result<String> {
        self.seen.lock().unwrap().push(query.clone());
        Ok(self.raw.clone())
    }
}

/// Strip the text table down to single-spaced tokens per line
pub fn squash_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

/// Write an executable `aws` stand-in that runs `body`
#[cfg(unix)]
pub fn fake_aws(dir: &TempDir, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("aws");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Fake `aws` that prints `document` and records its arguments in `args.txt`
#[cfg(unix)]
pub fn fake_aws_printing(dir: &TempDir, document: &str) -> PathBuf {
    let doc_path = dir.path().join("response.json");
    std::fs::write(&doc_path, document).unwrap();
    let args_path = dir.path().join("args.txt");
    fake_aws(
        dir,
        &format!(
            "for a in \"$@\"; do printf '%s\\n' \"$a\"; done > '{}'\ncat '{}'",
            args_path.display(),
            doc_path.display()
        ),
    )
}

/// Arguments recorded by [`fake_aws_printing`]
pub fn recorded_args(dir: &TempDir) -> Vec<String> {
    std::fs::read_to_string(dir.path().join("args.txt"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
