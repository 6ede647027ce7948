//! Detail payload returned by a bird's self-link.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Enrichment payload from the primary provider.
///
/// Only the top-level shape is enforced; nested map, conservation status,
/// image and audio payloads pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailResult {
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    pub map: Value,
    pub iucn: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub migration: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub dimorphism: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order: String,
    #[serde(deserialize_with = "null_as_default")]
    pub species: String,
    pub images: Value,
    pub audio: Value,
}
