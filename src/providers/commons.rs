//! Media search and per-file metadata client.

use serde::Deserialize;
use tracing::{debug, instrument};

use super::query_url;
use crate::fetch::{FetchError, HttpClient};
use crate::model::{ImageInfoResponse, ImagePages, null_as_default};

/// Default number of candidate titles requested per search.
pub const DEFAULT_MEDIA_LIMIT: u32 = 15;

const FILE_PREFIX: &str = "File:";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    #[serde(deserialize_with = "null_as_default")]
    query: SearchQuery,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchQuery {
    #[serde(deserialize_with = "null_as_default")]
    search: Vec<SearchHit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchHit {
    #[serde(deserialize_with = "null_as_default")]
    title: String,
}

/// Client for the media index.
#[derive(Debug, Clone)]
pub struct CommonsClient {
    http: HttpClient,
    search_url: String,
    image_info_url: String,
    limit: u32,
}

impl CommonsClient {
    #[must_use]
    pub fn new(
        http: HttpClient,
        search_url: impl Into<String>,
        image_info_url: impl Into<String>,
        limit: u32,
    ) -> Self {
        Self {
            http,
            search_url: search_url.into(),
            image_info_url: image_info_url.into(),
            limit: limit.max(1),
        }
    }

    /// Searches the file namespace for `name`, returning titles without their `File:` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the search fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn search_titles(&self, name: &str) -> Result<Vec<String>, FetchError> {
        let query = name.replace(' ', "_");
        let limit = self.limit.to_string();
        let url = query_url(
            &self.search_url,
            &[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", query.as_str()),
                ("srnamespace", "6"),
                ("utf8", ""),
                ("srlimit", limit.as_str()),
            ],
        )?;

        let response: SearchResponse = self.http.fetch_json(&url).await?;
        let titles: Vec<String> = response
            .query
            .search
            .into_iter()
            .map(|hit| strip_file_prefix(&hit.title).to_string())
            .filter(|title| !title.is_empty())
            .collect();

        debug!(count = titles.len(), "media search returned candidates");
        Ok(titles)
    }

    /// Fetches license and attribution metadata for one file title.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the lookup fails or the body is malformed.
    pub async fn image_info(&self, title: &str) -> Result<ImagePages, FetchError> {
        let file_title = format!("{FILE_PREFIX}{title}");
        let url = query_url(
            &self.image_info_url,
            &[
                ("action", "query"),
                ("prop", "imageinfo"),
                ("iiprop", "extmetadata|user|url"),
                ("titles", file_title.as_str()),
                ("format", "json"),
            ],
        )?;

        let response: ImageInfoResponse = self.http.fetch_json(&url).await?;
        Ok(response.query.pages)
    }
}

fn strip_file_prefix(title: &str) -> &str {
    title.strip_prefix(FILE_PREFIX).unwrap_or(title)
}
