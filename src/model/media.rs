//! Media search wire types and accepted media items.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Page-identifier to page mapping returned by an image-info lookup.
pub type ImagePages = HashMap<String, ImagePage>;

/// Top-level image-info response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageInfoResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub query: ImageInfoQuery,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageInfoQuery {
    #[serde(deserialize_with = "null_as_default")]
    pub pages: ImagePages,
}

/// One file page with zero or more image-info entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImagePage {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "imageinfo", deserialize_with = "null_as_default")]
    pub image_info: Vec<ImageInfoEntry>,
}

/// One revision of a file with its extended metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageInfoEntry {
    /// Direct file URL.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// File description page URL.
    #[serde(rename = "descriptionurl", deserialize_with = "null_as_default")]
    pub description_url: String,
    #[serde(rename = "extmetadata", deserialize_with = "null_as_default")]
    pub ext_metadata: ExtMetadata,
}

/// The subset of extended metadata used for licensing and attribution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ExtMetadata {
    #[serde(deserialize_with = "null_as_default")]
    pub object_name: MetadataValue,
    /// HTML-ish artist credit, usually an anchor around the name.
    #[serde(deserialize_with = "null_as_default")]
    pub artist: MetadataValue,
    #[serde(deserialize_with = "null_as_default")]
    pub license_short_name: MetadataValue,
    #[serde(deserialize_with = "null_as_default")]
    pub license_url: MetadataValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetadataValue {
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// An image that passed the license allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub url: String,
    pub description_url: String,
    pub object_name: String,
    /// Plain-text artist extracted from the credit markup.
    pub artist: String,
    pub license_short_name: String,
    pub license_url: String,
}
