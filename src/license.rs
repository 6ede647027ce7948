//! License allow-list filtering for media search results.
//!
//! Only images published under a free Creative Commons variant or dedicated
//! to the public domain are kept. Matching is exact on the license short name.

use tracing::trace;

use crate::model::{ImagePages, MediaItem};

/// License short names accepted for reuse.
pub const FREE_LICENSES: [&str; 10] = [
    "CC BY 2.0",
    "CC BY-SA 2.0",
    "CC BY 2.5",
    "CC BY-SA 2.5",
    "CC BY 3.0",
    "CC BY-SA 3.0",
    "CC BY 4.0",
    "CC BY-SA 4.0",
    "CC0 1.0",
    "CC0",
];

/// Returns `true` when `short_name` is exactly one of [`FREE_LICENSES`].
#[must_use]
pub fn is_free_license(short_name: &str) -> bool {
    FREE_LICENSES.contains(&short_name)
}

/// Keeps the image-info entries whose license is on the allow-list.
///
/// One [`MediaItem`] is produced per eligible entry. Output order follows the
/// iteration order of `pages`, which is not stable across runs.
#[must_use]
pub fn filter_licensed(pages: &ImagePages) -> Vec<MediaItem> {
    let mut items = Vec::new();

    for page in pages.values() {
        for info in &page.image_info {
            let meta = &info.ext_metadata;
            let license = meta.license_short_name.value.as_str();

            if !is_free_license(license) {
                trace!(title = %page.title, license, "dropping image with non-free license");
                continue;
            }

            items.push(MediaItem {
                url: info.url.clone(),
                description_url: info.description_url.clone(),
                object_name: meta.object_name.value.clone(),
                artist: extract_artist(&meta.artist.value).to_string(),
                license_short_name: license.to_string(),
                license_url: meta.license_url.value.clone(),
            });
        }
    }

    items
}

/// Extracts the text between the first `>` and the last `<`.
///
/// Returns `""` when either marker is missing or they are out of order.
#[must_use]
pub fn extract_artist(value: &str) -> &str {
    let (Some(open), Some(close)) = (value.find('>'), value.rfind('<')) else {
        return "";
    };
    let start = open + 1;
    if close > start {
        &value[start..close]
    } else {
        ""
    }
}
