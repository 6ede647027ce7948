//! Bird records as published by the listing endpoint.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// One bird entry from the listing.
///
/// Records are immutable once decoded; the batch owns them and hands each
/// one to an enricher by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdRecord {
    /// Stable identifier, e.g. `76-buteo-albigula`.
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    /// Display names.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: BirdName,
    /// Listing images.
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: BirdImages,
    /// Hypermedia links; `self` points at the detail resource.
    #[serde(rename = "_links", default, deserialize_with = "null_as_default")]
    pub links: BirdLinks,
    /// Position in the listing.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort: i64,
}

/// Spanish, English and scientific names of a bird.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdName {
    #[serde(default, deserialize_with = "null_as_default")]
    pub spanish: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub english: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latin: String,
}

/// Image URLs attached to a listing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdImages {
    #[serde(default, deserialize_with = "null_as_default")]
    pub main: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumb: String,
}

/// Links attached to a listing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdLinks {
    /// URL of this bird's detail resource.
    #[serde(rename = "self", default, deserialize_with = "null_as_default")]
    pub self_link: String,
    /// URL of the listing this bird belongs to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parent: String,
}

impl BirdRecord {
    /// Scientific name as listed (before any correction).
    #[must_use]
    pub fn latin_name(&self) -> &str {
        &self.name.latin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_record_decodes_listing_entry() {
        let json = r#"{
            "uid": "76-buteo-albigula",
            "name": {"spanish": "Aguilucho Chico", "english": "White-throated Hawk", "latin": "Buteo albigula"},
            "images": {"main": "m.jpg", "full": "f.jpg", "thumb": "t.jpg"},
            "_links": {"self": "https://aves.ninjas.cl/api/birds/76-buteo-albigula", "parent": "https://aves.ninjas.cl/api/birds"},
            "sort": 0
        }"#;
        let record: BirdRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.uid, "76-buteo-albigula");
        assert_eq!(record.latin_name(), "Buteo albigula");
        assert_eq!(
            record.links.self_link,
            "https://aves.ninjas.cl/api/birds/76-buteo-albigula"
        );
        assert_eq!(record.images.thumb, "t.jpg");
    }

    #[test]
    fn test_bird_record_tolerates_missing_optional_fields() {
        let record: BirdRecord = serde_json::from_str(r#"{"uid": "1-x"}"#).unwrap();
        assert_eq!(record.uid, "1-x");
        assert!(record.links.self_link.is_empty());
        assert_eq!(record.sort, 0);
    }

    #[test]
    fn test_bird_record_treats_null_fields_as_defaults() {
        let json = r#"{
            "uid": "2-y",
            "name": {"spanish": null, "english": "Hawk", "latin": null},
            "images": null,
            "_links": {"self": "https://aves.ninjas.cl/api/birds/2-y", "parent": null},
            "sort": null
        }"#;
        let record: BirdRecord = serde_json::from_str(json).unwrap();
        assert!(record.name.spanish.is_empty());
        assert_eq!(record.name.english, "Hawk");
        assert_eq!(record.latin_name(), "");
        assert_eq!(record.images, BirdImages::default());
        assert!(record.links.parent.is_empty());
        assert_eq!(record.sort, 0);
    }

    #[test]
    fn test_listing_with_null_entry_fields_still_decodes() {
        let json = r#"[{"uid": "1-a", "name": null}, {"uid": "2-b", "name": {"latin": "Buteo albigula"}}]"#;
        let records: Vec<BirdRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].latin_name(), "Buteo albigula");
    }
}
