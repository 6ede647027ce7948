//! Per-record aggregation of the three enrichment branches.

use serde::Serialize;

use super::{BirdRecord, DetailResult, MediaItem};

/// Encyclopedia text for a record.
///
/// A missing page is an expected outcome, represented as [`TextExtract::NotFound`]
/// rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum TextExtract {
    Found(String),
    NotFound,
}

impl TextExtract {
    /// Maps empty text to [`TextExtract::NotFound`]; any other text is kept as is.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::NotFound
        } else {
            Self::Found(text)
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Found(text) => Some(text),
            Self::NotFound => None,
        }
    }
}

/// Everything gathered for one record.
///
/// Created empty, filled by the branch reports, then handed downstream once.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResult {
    pub record: BirdRecord,
    /// Present only when the detail branch succeeded.
    pub detail: Option<DetailResult>,
    /// Present only when the text branch succeeded.
    pub extract: Option<TextExtract>,
    /// Licensed media, possibly empty.
    pub media: Vec<MediaItem>,
}

impl AggregatedResult {
    /// Creates an empty aggregate for `record`.
    #[must_use]
    pub fn new(record: BirdRecord) -> Self {
        Self {
            record,
            detail: None,
            extract: None,
            media: Vec::new(),
        }
    }

    #[must_use]
    pub fn uid(&self) -> &str {
        &self.record.uid
    }
}
