//! Source trait for cost data
//!
//! This module defines the `CostSource` trait that backends implement. The
//! report pipeline only sees raw response text, so `--json` can pass it
//! through untouched.

use crate::error::Result;
use crate::query::CostQuery;
use async_trait::async_trait;

/// Something that can answer a `GetCostAndUsage` query.
#[async_trait]
pub trait CostSource: Send + Sync {
    /// Run `query` and return the raw JSON document.
    async fn fetch(&self, query: &CostQuery) -> Result<String>;
}
