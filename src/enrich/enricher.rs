//! Per-record fan-out and fan-in across the three enrichment branches.
//!
//! Each record starts three tasks (detail, text, media) that report into one
//! channel with room for exactly [`BRANCH_COUNT`] messages. The merge step
//! reads that many reports in whatever order they arrive, so the aggregate
//! is never read while a branch can still write to it.
//!
//! The media branch fans out again: one lookup per candidate title, bounded
//! by a limiter shared by every record, collected through a second channel
//! before the license filter runs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, instrument, warn};

use super::{Branch, EnrichmentError, RecordProcessor};
use crate::fetch::FetchError;
use crate::license::filter_licensed;
use crate::model::{AggregatedResult, BirdRecord, DetailResult, ImagePages, MediaItem, TextExtract};
use crate::names::NameCorrections;
use crate::providers::{CommonsClient, Providers};

/// Number of branches started per record.
pub const BRANCH_COUNT: usize = 3;

/// Default number of per-title media lookups in flight across all records.
pub const DEFAULT_MEDIA_CONCURRENCY: usize = 5;

/// Message sent by a branch task when it finishes.
#[derive(Debug)]
enum BranchReport {
    Detail(Result<DetailResult, FetchError>),
    Text(Result<TextExtract, FetchError>),
    Media(Result<Vec<MediaItem>, FetchError>),
}

/// A branch that reported an error.
#[derive(Debug)]
pub struct BranchFailure {
    pub branch: Branch,
    pub error: FetchError,
}

/// Everything one record's branches produced, successes and failures alike.
///
/// Callers that accept partial data can read [`result`](Self::result)
/// directly; [`into_result`](Self::into_result) applies the all-or-nothing rule.
#[derive(Debug)]
pub struct RecordEnrichment {
    /// Aggregate holding every branch that succeeded.
    pub result: AggregatedResult,
    /// Failed branches in arrival order.
    pub failures: Vec<BranchFailure>,
    /// Number of reports read from the branch channel.
    pub received: usize,
}

impl RecordEnrichment {
    /// Returns `true` when every branch reported and none failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.received == BRANCH_COUNT
    }

    /// Converts into the record's final outcome.
    ///
    /// # Errors
    ///
    /// Returns the first branch failure observed, discarding the partial
    /// aggregate, or [`EnrichmentError::BranchLost`] when a branch never reported.
    pub fn into_result(self) -> Result<AggregatedResult, EnrichmentError> {
        let uid = self.result.record.uid.clone();
        if let Some(first) = self.failures.into_iter().next() {
            return Err(EnrichmentError::Branch {
                uid,
                branch: first.branch,
                source: first.error,
            });
        }
        if self.received < BRANCH_COUNT {
            return Err(EnrichmentError::BranchLost {
                uid,
                received: self.received,
            });
        }
        Ok(self.result)
    }
}

/// Enriches single records against the three providers.
///
/// Cheap to clone; clones share the providers, the name table and the media limiter.
#[derive(Debug, Clone)]
pub struct Enricher {
    inner: Arc<EnricherInner>,
}

#[derive(Debug)]
struct EnricherInner {
    providers: Providers,
    names: NameCorrections,
    media_limiter: Arc<Semaphore>,
}

impl Enricher {
    /// Creates an enricher.
    ///
    /// `media_concurrency` bounds per-title media lookups across every record
    /// handled by this enricher and its clones (minimum 1).
    #[must_use]
    pub fn new(providers: Providers, names: NameCorrections, media_concurrency: usize) -> Self {
        let media_concurrency = media_concurrency.max(1);
        debug!(
            media_concurrency,
            corrections = names.len(),
            "creating enricher"
        );
        Self {
            inner: Arc::new(EnricherInner {
                providers,
                names,
                media_limiter: Arc::new(Semaphore::new(media_concurrency)),
            }),
        }
    }

    /// Enriches `record`, treating any branch failure as fatal for the record.
    ///
    /// # Errors
    ///
    /// Returns the first branch error observed (see [`RecordEnrichment::into_result`]).
    pub async fn enrich(&self, record: &BirdRecord) -> Result<AggregatedResult, EnrichmentError> {
        self.enrich_partial(record).await.into_result()
    }

    /// Runs the three branches for `record` and merges whatever they report.
    #[instrument(skip(self, record), fields(uid = %record.uid))]
    pub async fn enrich_partial(&self, record: &BirdRecord) -> RecordEnrichment {
        let listed = record.latin_name();
        let lookup_name = self.inner.names.correct(listed).to_string();
        if lookup_name != listed {
            debug!(listed, corrected = %lookup_name, "using corrected scientific name");
        }

        let (tx, mut rx) = mpsc::channel::<BranchReport>(BRANCH_COUNT);

        {
            let inner = Arc::clone(&self.inner);
            let tx = tx.clone();
            let self_link = record.links.self_link.clone();
            tokio::spawn(async move {
                let report = inner.providers.aves.bird_detail(&self_link).await;
                send_report(&tx, BranchReport::Detail(report)).await;
            });
        }

        {
            let inner = Arc::clone(&self.inner);
            let tx = tx.clone();
            let name = lookup_name.clone();
            tokio::spawn(async move {
                let report = inner.providers.wikipedia.extract(&name).await;
                send_report(&tx, BranchReport::Text(report)).await;
            });
        }

        {
            let commons = self.inner.providers.commons.clone();
            let limiter = Arc::clone(&self.inner.media_limiter);
            let name = lookup_name;
            tokio::spawn(async move {
                let report = fetch_media(&commons, &limiter, &name).await;
                send_report(&tx, BranchReport::Media(report)).await;
            });
        }

        let mut enrichment = RecordEnrichment {
            result: AggregatedResult::new(record.clone()),
            failures: Vec::new(),
            received: 0,
        };

        while enrichment.received < BRANCH_COUNT {
            let Some(report) = rx.recv().await else {
                warn!(
                    received = enrichment.received,
                    "branch channel closed before every branch reported"
                );
                break;
            };
            enrichment.received += 1;
            merge_report(&mut enrichment, report);
        }

        debug!(
            received = enrichment.received,
            failures = enrichment.failures.len(),
            "merged branch reports"
        );
        enrichment
    }
}

#[async_trait]
impl RecordProcessor for Enricher {
    async fn process(&self, record: &BirdRecord) -> Result<AggregatedResult, EnrichmentError> {
        self.enrich(record).await
    }
}

async fn send_report(tx: &mpsc::Sender<BranchReport>, report: BranchReport) {
    if tx.send(report).await.is_err() {
        debug!("record merge ended before branch report was delivered");
    }
}

fn merge_report(enrichment: &mut RecordEnrichment, report: BranchReport) {
    let uid = enrichment.result.record.uid.as_str();
    let failure = match report {
        BranchReport::Detail(Ok(detail)) => {
            enrichment.result.detail = Some(detail);
            None
        }
        BranchReport::Text(Ok(extract)) => {
            if !extract.is_found() {
                info!(uid, "no encyclopedia extract found");
            }
            enrichment.result.extract = Some(extract);
            None
        }
        BranchReport::Media(Ok(media)) => {
            if media.is_empty() {
                info!(uid, "no freely licensed images found");
            }
            enrichment.result.media = media;
            None
        }
        BranchReport::Detail(Err(error)) => Some((Branch::Detail, error)),
        BranchReport::Text(Err(error)) => Some((Branch::Text, error)),
        BranchReport::Media(Err(error)) => Some((Branch::Media, error)),
    };

    if let Some((branch, error)) = failure {
        warn!(uid, %branch, error = %error, "branch failed");
        enrichment.failures.push(BranchFailure { branch, error });
    }
}

/// Searches the media index and filters every candidate's license metadata.
///
/// A failed search fails the branch; a failed per-title lookup only drops that title.
async fn fetch_media(
    commons: &CommonsClient,
    limiter: &Arc<Semaphore>,
    name: &str,
) -> Result<Vec<MediaItem>, FetchError> {
    let titles = commons.search_titles(name).await?;
    if titles.is_empty() {
        return Ok(Vec::new());
    }

    let (tx, mut rx) = mpsc::channel::<ImagePages>(titles.len());

    for title in titles {
        let commons = commons.clone();
        let limiter = Arc::clone(limiter);
        let tx = tx.clone();
        tokio::spawn(async move {
            let Ok(_permit) = limiter.acquire_owned().await else {
                warn!(%title, "media limiter closed; skipping title");
                return;
            };
            match commons.image_info(&title).await {
                Ok(pages) => {
                    if tx.send(pages).await.is_err() {
                        debug!(%title, "media collector gone before lookup finished");
                    }
                }
                Err(error) => warn!(%title, error = %error, "image metadata lookup failed"),
            }
        });
    }
    drop(tx);

    let mut media = Vec::new();
    while let Some(pages) = rx.recv().await {
        media.extend(filter_licensed(&pages));
    }
    Ok(media)
}
