//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Every response that arrives is handed back as-is, whatever its status.

use std::error::Error as StdError;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use probe_application::ports::{HttpClient, HttpClientError};
use probe_domain::request::{HttpMethod, JSON_CONTENT_TYPE, RequestBody, RequestSpec};
use probe_domain::response::{Header, Headers, ResponseSpec};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use tracing::trace;

const USER_AGENT: &str = "Probe/0.1.0";
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps a `reqwest::Client` and implements the `HttpClient` port from the
/// application layer.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "Probe/0.1.0"
    ///
    /// Timeouts are applied per request from `RequestSpec::timeout_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Attaches the body and its content type.
    fn build_body(builder: reqwest::RequestBuilder, body: &RequestBody) -> reqwest::RequestBuilder {
        match body {
            RequestBody::None => builder,
            RequestBody::Json(content) => builder
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(content.clone()),
        }
    }

    /// Flattens an error and its sources into one lowercase string.
    fn describe(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message.to_lowercase()
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let detail = Self::describe(error);
        let host = error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string();

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_connect() {
            if detail.contains("dns") || detail.contains("resolve") {
                return HttpClientError::DnsError {
                    host,
                    message: detail,
                };
            }
            if detail.contains("refused") {
                let port = error
                    .url()
                    .and_then(reqwest::Url::port_or_known_default)
                    .unwrap_or(80);
                return HttpClientError::ConnectionRefused { host, port };
            }
            if detail.contains("certificate") || detail.contains("tls") {
                return HttpClientError::Tls(detail);
            }
            return HttpClientError::ConnectionFailed(detail);
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(detail);
        }

        HttpClientError::Other(detail)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let timeout_ms = request.timeout_ms;
        let start = Instant::now();

        let builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone())
            .timeout(Duration::from_millis(timeout_ms));
        let builder = Self::build_body(builder, &request.body);

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                Header::new(name.as_str(), String::from_utf8_lossy(value.as_bytes()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;
        let duration = start.elapsed();

        trace!(status, bytes = body.len(), ?duration, "response received");
        Ok(ResponseSpec::new(status, headers, &body, duration))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use pretty_assertions::assert_eq;
    use probe_domain::TransportErrorKind;
    use reqwest::Url;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn spec(method: HttpMethod, url: &str) -> RequestSpec {
        RequestSpec::new(method, Url::parse(url).unwrap())
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_response() {
        let router = Router::new().route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, [("content-type", "application/json")], "{}") }),
        );
        let addr = serve(router).await;
        let client = ReqwestHttpClient::new().unwrap();

        let response = client
            .execute(&spec(HttpMethod::Get, &format!("http://{addr}/missing")))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.media_type().as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_body_and_content_type_are_sent() {
        let router = Router::new().route(
            "/echo",
            post(|headers: HeaderMap, body: String| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                (
                    StatusCode::CREATED,
                    [("content-type", "application/json; charset=utf-8")],
                    format!(r#"{{"contentType": "{content_type}", "echo": {body}}}"#),
                )
            }),
        );
        let addr = serve(router).await;
        let client = ReqwestHttpClient::new().unwrap();

        let request = spec(HttpMethod::Post, &format!("http://{addr}/echo"))
            .with_body(RequestBody::json(r#"{"title": "Claudia"}"#));
        let response = client.execute(&request).await.unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.body["contentType"], "application/json");
        assert_eq!(response.body["echo"]["title"], "Claudia");
        assert_eq!(
            response.headers.get("Content-Type"),
            Some("application/json; charset=utf-8")
        );
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let addr = serve(router).await;
        let client = ReqwestHttpClient::new().unwrap();

        let request =
            spec(HttpMethod::Get, &format!("http://{addr}/slow")).with_timeout_ms(100);
        let err = client.execute(&request).await.unwrap_err();

        assert_eq!(err, HttpClientError::Timeout { timeout_ms: 100 });
    }

    #[tokio::test]
    async fn test_closed_port_is_a_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ReqwestHttpClient::new().unwrap();
        let err = client
            .execute(&spec(HttpMethod::Get, &format!("http://{addr}/posts")))
            .await
            .unwrap_err();

        assert!(
            matches!(
                err,
                HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_)
            ),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_a_dns_error() {
        // `.invalid` is reserved and never resolves.
        let client = ReqwestHttpClient::new().unwrap();
        let err = client
            .execute(&spec(HttpMethod::Get, "http://no-such-host.invalid/posts"))
            .await
            .unwrap_err();

        let HttpClientError::DnsError { host, .. } = &err else {
            panic!("expected a DNS error, got {err:?}");
        };
        assert_eq!(host, "no-such-host.invalid");
        assert_eq!(err.to_error_kind(), TransportErrorKind::DnsError);
    }
}
