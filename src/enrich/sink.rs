//! Append-only accumulator for a batch's outcomes.
//!
//! Storing a result is the hand-off to persistence; here that hand-off is
//! simulated by logging the record, so nothing leaves the process.

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::EnrichmentError;
use crate::model::AggregatedResult;

/// A record that could not be enriched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub uid: String,
    pub error: String,
}

/// Collects aggregated results and per-record failures.
///
/// The lock is held only for the push itself; readers get copies.
#[derive(Debug, Default)]
pub struct ResultSink {
    results: Mutex<Vec<AggregatedResult>>,
    failures: Mutex<Vec<RecordFailure>>,
}

impl ResultSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `result` as persisted and appends it.
    pub async fn store(&self, result: AggregatedResult) {
        log_result(&result);
        self.results.lock().await.push(result);
    }

    /// Logs and appends a record failure.
    pub async fn record_failure(&self, error: &EnrichmentError) {
        warn!(uid = error.uid(), error = %error, "record skipped");
        self.failures.lock().await.push(RecordFailure {
            uid: error.uid().to_string(),
            error: error.to_string(),
        });
    }

    /// Returns a copy of the stored results.
    pub async fn results(&self) -> Vec<AggregatedResult> {
        self.results.lock().await.clone()
    }

    /// Returns a copy of the recorded failures.
    pub async fn failures(&self) -> Vec<RecordFailure> {
        self.failures.lock().await.clone()
    }

    /// Consumes the sink, returning results and failures.
    #[must_use]
    pub fn into_parts(self) -> (Vec<AggregatedResult>, Vec<RecordFailure>) {
        (self.results.into_inner(), self.failures.into_inner())
    }
}

fn log_result(result: &AggregatedResult) {
    let record = &result.record;
    let detail = result.detail.as_ref();
    info!(
        uid = %record.uid,
        spanish = %record.name.spanish,
        english = %record.name.english,
        latin = %record.name.latin,
        order = detail.map_or("", |d| d.order.as_str()),
        species = detail.map_or("", |d| d.species.as_str()),
        size = detail.map_or("", |d| d.size.as_str()),
        migration = detail.is_some_and(|d| d.migration),
        dimorphism = detail.is_some_and(|d| d.dimorphism),
        extract_found = result.extract.as_ref().is_some_and(|e| e.is_found()),
        media = result.media.len(),
        "record enriched"
    );

    match serde_json::to_string(result) {
        Ok(payload) => debug!(uid = %record.uid, %payload, "persisted record"),
        Err(error) => warn!(uid = %record.uid, error = %error, "could not serialize record"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enrich::Branch;
    use crate::fetch::FetchError;
    use crate::model::BirdRecord;

    fn result(uid: &str) -> AggregatedResult {
        let record: BirdRecord = serde_json::from_value(serde_json::json!({ "uid": uid })).unwrap();
        AggregatedResult::new(record)
    }

    #[tokio::test]
    async fn test_store_appends_and_returns_copies() {
        let sink = ResultSink::new();
        sink.store(result("1-a")).await;
        sink.store(result("2-b")).await;

        let mut copy = sink.results().await;
        copy.clear();

        let stored = sink.results().await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].uid(), "1-a");
    }

    #[tokio::test]
    async fn test_record_failure_keeps_uid_and_message() {
        let sink = ResultSink::new();
        let error = EnrichmentError::Branch {
            uid: "3-c".to_string(),
            branch: Branch::Media,
            source: FetchError::timeout("http://media"),
        };
        sink.record_failure(&error).await;

        let (results, failures) = sink.into_parts();
        assert!(results.is_empty());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].uid, "3-c");
        assert!(failures[0].error.contains("media branch failed"));
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let sink = std::sync::Arc::new(ResultSink::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let sink = std::sync::Arc::clone(&sink);
            handles.push(tokio::spawn(async move {
                sink.store(result(&format!("{i}-x"))).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(sink.results().await.len(), 50);
    }
}
