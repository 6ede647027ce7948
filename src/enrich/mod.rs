//! Concurrent enrichment of bird records.
//!
//! # Architecture
//!
//! - [`Enricher`] - per-record fan-out of the detail, text and media branches
//!   into one result channel, merged once all three have reported
//! - [`BatchCoordinator`] - runs a [`RecordProcessor`] for every record under a
//!   fixed-size limiter and collects the outcome
//! - [`ResultSink`] - append-only accumulator that logs each stored record
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bird_enricher::enrich::{BatchCoordinator, Enricher, DEFAULT_CONCURRENCY, DEFAULT_MEDIA_CONCURRENCY};
//! use bird_enricher::fetch::{HttpClient, RetryPolicy};
//! use bird_enricher::names::NameCorrections;
//! use bird_enricher::providers::{Endpoints, Providers, DEFAULT_MEDIA_LIMIT};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let http = HttpClient::new(RetryPolicy::default())?;
//! let providers = Providers::new(&http, &Endpoints::default(), DEFAULT_MEDIA_LIMIT);
//! let records = providers.aves.list_birds().await?;
//! let enricher = Enricher::new(providers, NameCorrections::builtin(), DEFAULT_MEDIA_CONCURRENCY);
//! let coordinator = BatchCoordinator::new(Arc::new(enricher), DEFAULT_CONCURRENCY)?;
//! let outcome = coordinator.run(records).await?;
//! println!("dispatched {}", outcome.stats.dispatched());
//! # Ok(())
//! # }
//! ```

mod batch;
mod enricher;
mod sink;

pub use batch::{
    BatchCoordinator, BatchError, BatchOutcome, BatchStats, DEFAULT_CONCURRENCY, MAX_CONCURRENCY,
};
pub use enricher::{
    BRANCH_COUNT, BranchFailure, DEFAULT_MEDIA_CONCURRENCY, Enricher, RecordEnrichment,
};
pub use sink::{RecordFailure, ResultSink};

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::model::{AggregatedResult, BirdRecord};

/// One of the three upstream queries made per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Primary provider detail behind the record's self-link.
    Detail,
    /// Encyclopedia text extract.
    Text,
    /// Media search plus per-file license lookups.
    Media,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Detail => "detail",
            Self::Text => "text",
            Self::Media => "media",
        })
    }
}

/// Errors that end a single record's enrichment.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// A branch failed; the first failure observed is authoritative for the record.
    #[error("{branch} branch failed for {uid}: {source}")]
    Branch {
        /// Record identifier.
        uid: String,
        /// The failing branch.
        branch: Branch,
        /// The fetch error reported by that branch.
        #[source]
        source: FetchError,
    },

    /// A branch task ended without reporting.
    #[error("only {received} of {BRANCH_COUNT} branches reported for {uid}")]
    BranchLost {
        /// Record identifier.
        uid: String,
        /// Reports received before the channel closed.
        received: usize,
    },
}

impl EnrichmentError {
    /// The branch that failed, when known.
    #[must_use]
    pub fn branch(&self) -> Option<Branch> {
        match self {
            Self::Branch { branch, .. } => Some(*branch),
            Self::BranchLost { .. } => None,
        }
    }

    /// Identifier of the record this error belongs to.
    #[must_use]
    pub fn uid(&self) -> &str {
        match self {
            Self::Branch { uid, .. } | Self::BranchLost { uid, .. } => uid,
        }
    }
}

/// Processes one record into an aggregated result.
///
/// The batch coordinator dispatches through this trait so the enrichment
/// strategy can be swapped (tests use in-memory processors).
#[async_trait]
pub trait RecordProcessor: Send + Sync {
    /// Enriches `record`, returning its aggregate or the error that ended it.
    async fn process(&self, record: &BirdRecord) -> Result<AggregatedResult, EnrichmentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_display() {
        assert_eq!(Branch::Detail.to_string(), "detail");
        assert_eq!(Branch::Text.to_string(), "text");
        assert_eq!(Branch::Media.to_string(), "media");
    }

    #[test]
    fn test_enrichment_error_branch_display_names_branch_and_cause() {
        let source = FetchError::exhausted(
            "http://x/api/birds/1",
            3,
            FetchError::http_status("http://x/api/birds/1", 500, ""),
        );
        let error = EnrichmentError::Branch {
            uid: "1-a".to_string(),
            branch: Branch::Detail,
            source,
        };
        let msg = error.to_string();
        assert!(msg.starts_with("detail branch failed for 1-a"), "got: {msg}");
        assert!(msg.contains("after 3 attempts"), "got: {msg}");
        assert_eq!(error.branch(), Some(Branch::Detail));
        assert_eq!(error.uid(), "1-a");
    }

    #[test]
    fn test_enrichment_error_branch_lost_display() {
        let error = EnrichmentError::BranchLost {
            uid: "2-b".to_string(),
            received: 2,
        };
        assert_eq!(error.to_string(), "only 2 of 3 branches reported for 2-b");
        assert_eq!(error.branch(), None);
    }
}
