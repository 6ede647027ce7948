//! Records, upstream payloads and aggregated results.

mod aggregate;
mod bird;
mod detail;
mod media;

pub use aggregate::{AggregatedResult, TextExtract};
pub use bird::{BirdImages, BirdLinks, BirdName, BirdRecord};
pub use detail::DetailResult;
pub use media::{
    ExtMetadata, ImageInfoEntry, ImageInfoQuery, ImageInfoResponse, ImagePage, ImagePages,
    MediaItem, MetadataValue,
};

use serde::{Deserialize, Deserializer};

/// Decodes a field, mapping an explicit JSON `null` to the type's default.
///
/// `#[serde(default)]` only covers missing keys; upstream payloads also send
/// `null` for absent scalars.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
