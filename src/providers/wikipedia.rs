//! Encyclopedia text-extract client.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, instrument};

use super::query_url;
use crate::fetch::{FetchError, HttpClient};
use crate::model::{TextExtract, null_as_default};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtractResponse {
    #[serde(deserialize_with = "null_as_default")]
    query: ExtractQuery,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtractQuery {
    #[serde(deserialize_with = "null_as_default")]
    pages: HashMap<String, ExtractPage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtractPage {
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    extract: Option<String>,
}

/// Client for plain-text page extracts.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    http: HttpClient,
    api_url: String,
}

impl WikipediaClient {
    #[must_use]
    pub fn new(http: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Looks up the extract for the page titled `name`.
    ///
    /// Spaces become underscores in the title. The first page with a non-empty
    /// extract wins; a missing page or an empty extract yields
    /// [`TextExtract::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn extract(&self, name: &str) -> Result<TextExtract, FetchError> {
        let title = name.replace(' ', "_");
        let url = query_url(
            &self.api_url,
            &[
                ("action", "query"),
                ("format", "json"),
                ("titles", title.as_str()),
                ("prop", "extracts|pageimages"),
                ("explaintext", "true"),
                ("ppprop", "original"),
                ("origin", "*"),
            ],
        )?;

        let response: ExtractResponse = self.http.fetch_json(&url).await?;

        let found = response
            .query
            .pages
            .into_values()
            .find_map(|page| match page.extract {
                Some(text) if !text.is_empty() => Some((page.title, text)),
                _ => None,
            });

        Ok(match found {
            Some((page_title, text)) => {
                debug!(page = %page_title, chars = text.len(), "found extract");
                TextExtract::from_text(text)
            }
            None => TextExtract::NotFound,
        })
    }
}
