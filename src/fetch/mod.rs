//! Resilient JSON fetching shared by every provider call.
//!
//! # Features
//!
//! - One pooled client with a browser-like header set
//! - Explicit connect timeout and keep-alive (30s by default)
//! - Bounded retries for transient failures (network errors, non-2xx statuses)
//! - Malformed JSON is reported immediately, never retried
//!
//! # Example
//!
//! ```no_run
//! use bird_enricher::fetch::{HttpClient, RetryPolicy};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(RetryPolicy::with_max_attempts(3))?;
//! let value: serde_json::Value = client
//!     .fetch_json("https://aves.ninjas.cl/api/birds/76-buteo-albigula")
//!     .await?;
//! println!("{value}");
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;
mod retry;

pub use client::HttpClient;
pub use error::FetchError;
pub use retry::{FailureType, RetryDecision, RetryPolicy, classify_error};
