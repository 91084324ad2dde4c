//! HTTP Client port

use async_trait::async_trait;
use probe_domain::{RequestSpec, ResponseSpec, TransportErrorKind};
use thiserror::Error;

/// Errors an HTTP client reports when no response could be obtained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request did not complete within its time budget.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Budget that was exceeded.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS handshake or certificate failure.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be sent.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Redirect limit exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Maps this error to the transport failure category used in reports.
    #[must_use]
    pub const fn to_error_kind(&self) -> TransportErrorKind {
        match self {
            Self::Timeout { .. } => TransportErrorKind::Timeout,
            Self::DnsError { .. } => TransportErrorKind::DnsError,
            Self::ConnectionRefused { .. } => TransportErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => TransportErrorKind::ConnectionFailed,
            Self::Tls(_) => TransportErrorKind::TlsError,
            Self::InvalidUrl(_) => TransportErrorKind::InvalidUrl,
            Self::InvalidBody(_) => TransportErrorKind::InvalidBody,
            Self::TooManyRedirects { .. } => TransportErrorKind::TooManyRedirects,
            Self::Other(_) => TransportErrorKind::Unknown,
        }
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// Any status code, 4xx and 5xx included, is a successful exchange.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was obtained: network failure,
    /// timeout, or a request that could not be built.
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError>;
}
