//! Bird Enricher Library
//!
//! This library enriches a public bird listing with the species detail from
//! the same provider, an encyclopedia text extract, and freely licensed media
//! from the shared media repository.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fetch`] - JSON-over-HTTP client with bounded retry
//! - [`providers`] - listing, encyclopedia and media provider clients
//! - [`license`] - free-license filter over image metadata
//! - [`names`] - scientific name corrections applied before lookups
//! - [`model`] - decoded provider payloads and the aggregated result
//! - [`enrich`] - per-record fan-out and the bounded batch coordinator

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod enrich;
pub mod fetch;
pub mod license;
pub mod model;
pub mod names;
pub mod providers;
mod user_agent;

// Re-export commonly used types
pub use enrich::{
    BatchCoordinator, BatchError, BatchOutcome, BatchStats, DEFAULT_CONCURRENCY,
    DEFAULT_MEDIA_CONCURRENCY, Enricher, EnrichmentError, RecordProcessor, ResultSink,
};
pub use fetch::{FailureType, FetchError, HttpClient, RetryDecision, RetryPolicy, classify_error};
pub use license::{filter_licensed, is_free_license};
pub use model::{AggregatedResult, BirdRecord, DetailResult, MediaItem, TextExtract};
pub use names::NameCorrections;
pub use providers::{Endpoints, Providers};
pub use user_agent::BROWSER_USER_AGENT;
