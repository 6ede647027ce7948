//! Bird listing and detail client.

use tracing::{debug, instrument};

use crate::fetch::{FetchError, HttpClient};
use crate::model::{BirdRecord, DetailResult};

/// Client for the bird listing provider.
#[derive(Debug, Clone)]
pub struct AvesClient {
    http: HttpClient,
    listing_url: String,
}

impl AvesClient {
    #[must_use]
    pub fn new(http: HttpClient, listing_url: impl Into<String>) -> Self {
        Self {
            http,
            listing_url: listing_url.into(),
        }
    }

    /// Fetches the full ordered listing.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the listing cannot be fetched or decoded.
    #[instrument(skip(self), fields(url = %self.listing_url))]
    pub async fn list_birds(&self) -> Result<Vec<BirdRecord>, FetchError> {
        let birds: Vec<BirdRecord> = self.http.fetch_json(&self.listing_url).await?;
        debug!(count = birds.len(), "fetched bird listing");
        Ok(birds)
    }

    /// Fetches the detail resource behind a record's self-link.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the detail cannot be fetched or decoded.
    pub async fn bird_detail(&self, self_link: &str) -> Result<DetailResult, FetchError> {
        self.http.fetch_json(self_link).await
    }
}
