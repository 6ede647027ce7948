//! Browser-like request headers shared by every provider call.
//!
//! The upstream providers reject unidentified or bot-looking clients, so every
//! request carries the same realistic header set.

use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};

/// Desktop browser User-Agent sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const ACCEPT_VALUE: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9,es;q=0.8";

/// Builds the fixed header set applied to every outgoing request.
#[must_use]
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_headers_identify_as_browser() {
        let headers = browser_headers();
        let ua = headers[USER_AGENT].to_str().unwrap_or_default();
        assert!(ua.starts_with("Mozilla/5.0"), "UA must look like a browser: {ua}");
        assert!(!ua.contains("bird-enricher"), "UA must not name the tool: {ua}");
    }

    #[test]
    fn test_browser_headers_accept_json_and_keep_alive() {
        let headers = browser_headers();
        assert_eq!(headers[ACCEPT], ACCEPT_VALUE);
        assert_eq!(headers[ACCEPT_LANGUAGE], ACCEPT_LANGUAGE_VALUE);
        assert_eq!(headers[CONNECTION], "keep-alive");
        assert_eq!(headers["upgrade-insecure-requests"], "1");
    }
}
