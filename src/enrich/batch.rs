//! Batch coordinator for bounded-concurrency record enrichment.
//!
//! The coordinator spawns one task per record, gated by a semaphore so that
//! at most `concurrency` records are in flight at once. Per-record failures
//! are recorded and never abort the batch.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::sink::{RecordFailure, ResultSink};
use super::RecordProcessor;
use crate::model::{AggregatedResult, BirdRecord};

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_CONCURRENCY: usize = 100;

/// Default number of records enriched at once.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Error type for batch coordinator operations.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("record limiter closed unexpectedly")]
    LimiterClosed,
}

/// Counters from one batch run.
///
/// `dispatched` counts every record handed to a task; `succeeded` and
/// `failed` split that count by outcome.
#[derive(Debug, Default)]
pub struct BatchStats {
    dispatched: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

impl BatchStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records dispatched to a task.
    #[must_use]
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    /// Returns the number of records enriched successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    /// Returns the number of records that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    fn increment_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_succeeded(&self) {
        self.succeeded.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Self {
        Self {
            dispatched: AtomicUsize::new(self.dispatched()),
            succeeded: AtomicUsize::new(self.succeeded()),
            failed: AtomicUsize::new(self.failed()),
        }
    }
}

/// Everything a batch run produced.
#[derive(Debug)]
pub struct BatchOutcome {
    pub stats: BatchStats,
    pub results: Vec<AggregatedResult>,
    pub failures: Vec<RecordFailure>,
}

/// Runs a [`RecordProcessor`] over a batch of records with bounded concurrency.
///
/// # Concurrency Model
///
/// - Each record runs in its own Tokio task
/// - A semaphore permit is acquired before the task is spawned
/// - The permit is released when that record finishes, success or failure (RAII)
/// - `run` returns once every spawned task has completed
pub struct BatchCoordinator {
    processor: Arc<dyn RecordProcessor>,
    semaphore: Arc<Semaphore>,
    concurrency: usize,
}

impl std::fmt::Debug for BatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("concurrency", &self.concurrency)
            .field("available_permits", &self.semaphore.available_permits())
            .finish_non_exhaustive()
    }
}

impl BatchCoordinator {
    /// Creates a coordinator that keeps at most `concurrency` records in flight.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    #[instrument(level = "debug", skip(processor))]
    pub fn new(
        processor: Arc<dyn RecordProcessor>,
        concurrency: usize,
    ) -> Result<Self, BatchError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(BatchError::InvalidConcurrency { value: concurrency });
        }

        Ok(Self {
            processor,
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Enriches every record and waits for all of them to finish.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::LimiterClosed`] if the semaphore is closed.
    ///
    /// Note: individual record failures do NOT cause this method to error;
    /// they are logged and returned in [`BatchOutcome::failures`].
    #[instrument(skip(self, records), fields(records = records.len(), concurrency = self.concurrency))]
    pub async fn run(&self, records: Vec<BirdRecord>) -> Result<BatchOutcome, BatchError> {
        let stats = Arc::new(BatchStats::new());
        let sink = Arc::new(ResultSink::new());
        let mut handles = Vec::with_capacity(records.len());

        info!("starting batch");

        for record in records {
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| BatchError::LimiterClosed)?;

            debug!(uid = %record.uid, "dispatching record");
            stats.increment_dispatched();

            let processor = Arc::clone(&self.processor);
            let stats = Arc::clone(&stats);
            let sink = Arc::clone(&sink);

            handles.push(tokio::spawn(async move {
                let _permit = permit;

                match processor.process(&record).await {
                    Ok(result) => {
                        sink.store(result).await;
                        stats.increment_succeeded();
                    }
                    Err(error) => {
                        sink.record_failure(&error).await;
                        stats.increment_failed();
                    }
                }
            }));
        }

        debug!(task_count = handles.len(), "waiting for records to complete");

        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "record task panicked");
                stats.increment_failed();
            }
        }

        let stats = stats.snapshot();
        info!(
            dispatched = stats.dispatched(),
            succeeded = stats.succeeded(),
            failed = stats.failed(),
            "batch complete"
        );

        let (results, failures) = match Arc::try_unwrap(sink) {
            Ok(sink) => sink.into_parts(),
            Err(shared) => (shared.results().await, shared.failures().await),
        };

        Ok(BatchOutcome {
            stats,
            results,
            failures,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::enrich::{Branch, EnrichmentError};
    use crate::fetch::FetchError;

    fn records(count: usize) -> Vec<BirdRecord> {
        (0..count)
            .map(|i| serde_json::from_value(serde_json::json!({ "uid": format!("{i}-bird") })).unwrap())
            .collect()
    }

    /// Tracks how many records are processed at the same time.
    #[derive(Default)]
    struct CountingProcessor {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl RecordProcessor for CountingProcessor {
        async fn process(&self, record: &BirdRecord) -> Result<AggregatedResult, EnrichmentError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(AggregatedResult::new(record.clone()))
        }
    }

    /// Fails every record whose uid starts with an odd digit.
    struct OddFailingProcessor;

    #[async_trait]
    impl RecordProcessor for OddFailingProcessor {
        async fn process(&self, record: &BirdRecord) -> Result<AggregatedResult, EnrichmentError> {
            let index: usize = record.uid.split('-').next().unwrap().parse().unwrap();
            if index % 2 == 1 {
                return Err(EnrichmentError::Branch {
                    uid: record.uid.clone(),
                    branch: Branch::Detail,
                    source: FetchError::timeout("http://detail"),
                });
            }
            Ok(AggregatedResult::new(record.clone()))
        }
    }

    #[test]
    fn test_coordinator_new_valid_concurrency() {
        let processor: Arc<dyn RecordProcessor> = Arc::new(CountingProcessor::default());
        for value in [1, DEFAULT_CONCURRENCY, MAX_CONCURRENCY] {
            let coordinator = BatchCoordinator::new(Arc::clone(&processor), value).unwrap();
            assert_eq!(coordinator.concurrency(), value);
        }
    }

    #[test]
    fn test_coordinator_new_invalid_concurrency() {
        let processor: Arc<dyn RecordProcessor> = Arc::new(CountingProcessor::default());
        assert!(matches!(
            BatchCoordinator::new(Arc::clone(&processor), 0),
            Err(BatchError::InvalidConcurrency { value: 0 })
        ));
        assert!(matches!(
            BatchCoordinator::new(processor, 101),
            Err(BatchError::InvalidConcurrency { value: 101 })
        ));
    }

    #[test]
    fn test_batch_error_display() {
        let msg = BatchError::InvalidConcurrency { value: 0 }.to_string();
        assert!(msg.contains("invalid concurrency"));
        assert!(msg.contains("100"));
    }

    #[tokio::test]
    async fn test_run_never_exceeds_concurrency() {
        let processor = Arc::new(CountingProcessor::default());
        let coordinator = BatchCoordinator::new(processor.clone(), 3).unwrap();

        let outcome = coordinator.run(records(20)).await.unwrap();

        assert_eq!(outcome.stats.dispatched(), 20);
        assert_eq!(outcome.stats.succeeded(), 20);
        assert_eq!(outcome.results.len(), 20);
        let peak = processor.peak.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak in-flight {peak} exceeded limit 3");
        assert!(peak >= 2, "records should overlap, peak was {peak}");
    }

    #[tokio::test]
    async fn test_run_failures_do_not_abort_batch() {
        let coordinator = BatchCoordinator::new(Arc::new(OddFailingProcessor), 5).unwrap();

        let outcome = coordinator.run(records(6)).await.unwrap();

        assert_eq!(outcome.stats.dispatched(), 6);
        assert_eq!(outcome.stats.succeeded(), 3);
        assert_eq!(outcome.stats.failed(), 3);
        assert_eq!(outcome.results.len(), 3);
        let mut failed: Vec<_> = outcome.failures.iter().map(|f| f.uid.as_str()).collect();
        failed.sort_unstable();
        assert_eq!(failed, ["1-bird", "3-bird", "5-bird"]);
    }

    #[tokio::test]
    async fn test_run_empty_batch() {
        let coordinator = BatchCoordinator::new(Arc::new(OddFailingProcessor), 5).unwrap();
        let outcome = coordinator.run(Vec::new()).await.unwrap();
        assert_eq!(outcome.stats.dispatched(), 0);
        assert!(outcome.results.is_empty());
        assert!(outcome.failures.is_empty());
    }
}
