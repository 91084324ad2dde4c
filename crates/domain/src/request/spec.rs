//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::{HttpMethod, RequestBody};

/// Default time budget for a single request.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// A fully resolved HTTP request, ready to be handed to an HTTP client.
///
/// Built from a test case once the base address has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL, query string included
    pub url: Url,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Upper bound on the wait for a response
    pub timeout_ms: u64,
}

impl RequestSpec {
    /// Creates a request with no body and the default timeout.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            body: RequestBody::None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the URL host, or `"unknown"` for host-less URLs.
    #[must_use]
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("unknown")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request() {
        let url = Url::parse("https://api.example.com/posts/2").unwrap();
        let req = RequestSpec::new(HttpMethod::Get, url);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.body, RequestBody::None);
        assert_eq!(req.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(req.host(), "api.example.com");
    }

    #[test]
    fn test_builder() {
        let url = Url::parse("https://api.example.com/posts").unwrap();
        let req = RequestSpec::new(HttpMethod::Post, url)
            .with_body(RequestBody::json("{}"))
            .with_timeout_ms(500);
        assert_eq!(req.body, RequestBody::json("{}"));
        assert_eq!(req.timeout_ms, 500);
    }
}
