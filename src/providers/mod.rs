//! Clients for the three upstream providers.
//!
//! - [`AvesClient`] - bird listing and per-bird detail
//! - [`WikipediaClient`] - encyclopedia text extracts
//! - [`CommonsClient`] - media search and per-file license metadata
//!
//! All clients share one [`HttpClient`](crate::fetch::HttpClient) and take
//! their base URLs from [`Endpoints`], which tests point at a mock server.

mod aves;
mod commons;
mod wikipedia;

pub use aves::AvesClient;
pub use commons::{CommonsClient, DEFAULT_MEDIA_LIMIT};
pub use wikipedia::WikipediaClient;

use url::Url;

use crate::fetch::{FetchError, HttpClient};

/// Default bird listing URL.
pub const DEFAULT_LISTING_URL: &str = "https://aves.ninjas.cl/api/birds";

/// Default encyclopedia API (Spanish Wikipedia).
pub const DEFAULT_WIKIPEDIA_API: &str = "https://es.wikipedia.org/w/api.php";

/// Default media search API (Wikimedia Commons).
pub const DEFAULT_COMMONS_API: &str = "https://commons.wikimedia.org/w/api.php";

/// Default per-file license metadata API (English Wikipedia).
pub const DEFAULT_IMAGE_INFO_API: &str = "https://en.wikipedia.org/w/api.php";

/// Base URLs for every upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub listing: String,
    pub wikipedia: String,
    pub commons: String,
    pub image_info: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            listing: DEFAULT_LISTING_URL.to_string(),
            wikipedia: DEFAULT_WIKIPEDIA_API.to_string(),
            commons: DEFAULT_COMMONS_API.to_string(),
            image_info: DEFAULT_IMAGE_INFO_API.to_string(),
        }
    }
}

impl Endpoints {
    /// Lays every endpoint out under one base URL (used against mock servers).
    ///
    /// Paths: `/api/birds`, `/eswiki/w/api.php`, `/commons/w/api.php`, `/enwiki/w/api.php`.
    #[must_use]
    pub fn under(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            listing: format!("{base}/api/birds"),
            wikipedia: format!("{base}/eswiki/w/api.php"),
            commons: format!("{base}/commons/w/api.php"),
            image_info: format!("{base}/enwiki/w/api.php"),
        }
    }
}

/// The three provider clients used per record, sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct Providers {
    pub aves: AvesClient,
    pub wikipedia: WikipediaClient,
    pub commons: CommonsClient,
}

impl Providers {
    /// Builds every client against `endpoints`, asking for `media_limit` candidates per search.
    #[must_use]
    pub fn new(http: &HttpClient, endpoints: &Endpoints, media_limit: u32) -> Self {
        Self {
            aves: AvesClient::new(http.clone(), endpoints.listing.clone()),
            wikipedia: WikipediaClient::new(http.clone(), endpoints.wikipedia.clone()),
            commons: CommonsClient::new(
                http.clone(),
                endpoints.commons.clone(),
                endpoints.image_info.clone(),
                media_limit,
            ),
        }
    }
}

/// Appends encoded query parameters to `base`.
pub(crate) fn query_url(base: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
    Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|_| FetchError::invalid_url(base))
}
