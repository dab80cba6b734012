//! Port interfaces for work-order enrichment

use async_trait::async_trait;
use fieldlink_domain::{Enrichment, Result, SummaryRequest};

/// Trait for the optional summarization service
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize a work order into document links.
    ///
    /// Returns `Enrichment::default()` when no endpoint is configured; fails
    /// like any other outbound HTTP call otherwise.
    async fn summarize(&self, request: &SummaryRequest) -> Result<Enrichment>;
}
