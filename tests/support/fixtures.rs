//! Canned provider payloads and mock mounting helpers.

#![allow(dead_code)]

use std::time::Duration;

use bird_enricher::{Endpoints, Enricher, HttpClient, NameCorrections, Providers, RetryPolicy};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LISTING_PATH: &str = "/api/birds";
pub const WIKIPEDIA_PATH: &str = "/eswiki/w/api.php";
pub const COMMONS_PATH: &str = "/commons/w/api.php";
pub const IMAGE_INFO_PATH: &str = "/enwiki/w/api.php";

/// Candidate titles requested per media search by the test providers.
pub const MEDIA_LIMIT: u32 = 15;

/// A listing entry whose self-link points at `{base}/api/birds/{uid}`.
pub fn bird_json(base: &str, uid: &str, latin: &str) -> Value {
    json!({
        "uid": uid,
        "name": { "spanish": "Aguilucho chico", "english": "White-throated Hawk", "latin": latin },
        "images": { "main": "m.jpg", "full": "f.jpg", "thumb": "t.jpg" },
        "_links": { "self": format!("{base}{LISTING_PATH}/{uid}"), "parent": format!("{base}{LISTING_PATH}") },
        "sort": 1
    })
}

pub fn detail_json(uid: &str) -> Value {
    json!({
        "uid": uid,
        "map": { "image": "map.png" },
        "iucn": { "title": "Preocupación menor", "description": "LC" },
        "migration": false,
        "dimorphism": true,
        "size": "46 cm",
        "order": "Accipitriformes",
        "species": "Buteo albigula",
        "images": { "gallery": [] },
        "audio": {}
    })
}

pub fn extract_json(title: &str, extract: Option<&str>) -> Value {
    let mut page = json!({ "pageid": 101, "title": title });
    if let Some(text) = extract {
        page["extract"] = json!(text);
    }
    json!({ "query": { "pages": { "101": page } } })
}

pub fn search_json(titles: &[&str]) -> Value {
    let hits: Vec<Value> = titles
        .iter()
        .map(|title| json!({ "ns": 6, "title": format!("File:{title}") }))
        .collect();
    json!({ "query": { "search": hits } })
}

pub fn image_info_json(title: &str, license: &str, artist: &str) -> Value {
    json!({
        "query": {
            "pages": {
                "-1": {
                    "title": format!("File:{title}"),
                    "imageinfo": [{
                        "url": format!("https://upload.example.org/{title}"),
                        "descriptionurl": format!("https://commons.example.org/wiki/File:{title}"),
                        "extmetadata": {
                            "ObjectName": { "value": title },
                            "Artist": { "value": artist },
                            "LicenseShortName": { "value": license },
                            "LicenseUrl": { "value": "https://creativecommons.org/licenses/by-sa/4.0" }
                        }
                    }]
                }
            }
        }
    })
}

pub async fn mount_listing(server: &MockServer, birds: &[Value]) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(birds))
        .mount(server)
        .await;
}

pub async fn mount_detail(server: &MockServer, uid: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{LISTING_PATH}/{uid}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(uid)))
        .mount(server)
        .await;
}

/// Mounts an extract response for the underscore-joined `title`.
pub async fn mount_extract(server: &MockServer, title: &str, extract: Option<&str>) {
    Mock::given(method("GET"))
        .and(path(WIKIPEDIA_PATH))
        .and(query_param("titles", title))
        .respond_with(ResponseTemplate::new(200).set_body_json(extract_json(title, extract)))
        .mount(server)
        .await;
}

/// Mounts a media search for the underscore-joined `query` returning `titles`.
pub async fn mount_search(server: &MockServer, query: &str, titles: &[&str]) {
    Mock::given(method("GET"))
        .and(path(COMMONS_PATH))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", query))
        .and(query_param("srlimit", MEDIA_LIMIT.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_json(titles)))
        .mount(server)
        .await;
}

pub async fn mount_image_info(server: &MockServer, title: &str, license: &str, artist: &str) {
    Mock::given(method("GET"))
        .and(path(IMAGE_INFO_PATH))
        .and(query_param("titles", format!("File:{title}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(image_info_json(title, license, artist)),
        )
        .mount(server)
        .await;
}

/// Retry policy used by tests: three attempts, no delay.
pub fn test_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::ZERO)
}

pub fn test_providers(server: &MockServer) -> Providers {
    let http = HttpClient::new(test_policy()).unwrap();
    Providers::new(&http, &Endpoints::under(&server.uri()), MEDIA_LIMIT)
}

pub fn test_enricher(server: &MockServer) -> Enricher {
    Enricher::new(test_providers(server), NameCorrections::builtin(), 5)
}
