use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;

use crate::{Error, Result};

const CLIENT_USER_AGENT: &str = concat!("headliner/", env!("CARGO_PKG_VERSION"));

/// Build HTTP client with the configured timeout
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(Error::Http)
}

/// Headers sent with every upstream JSON request
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers
}

/// Pull the upstream `message` out of an error body, or fall back to raw text
pub(crate) fn upstream_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let preview = &body[..body.len().min(200)];
            String::from_utf8_lossy(preview).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_from_json() {
        assert_eq!(upstream_message(br#"{"message":"rate limited"}"#), "rate limited");
    }

    #[test]
    fn test_upstream_message_falls_back_to_text() {
        assert_eq!(upstream_message(b"Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_upstream_message_truncates_long_body() {
        let body = vec![b'x'; 1000];
        assert_eq!(upstream_message(&body).len(), 200);
    }
}
