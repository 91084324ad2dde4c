//! Run Case Use Case
//!
//! Builds the request a test case declares, sends it, and evaluates the
//! case's assertions against the response.

use std::sync::Arc;
use std::time::Instant;

use probe_domain::request::DEFAULT_TIMEOUT_MS;
use probe_domain::{
    BaseAddress, CaseOutcome, CaseReport, DomainError, ResponseSpec, TestCase,
    TransportErrorKind, evaluate,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ports::{HttpClient, HttpClientError};

/// Result type for dispatching a case.
pub type DispatchResult = Result<ResponseSpec, RunCaseError>;

/// Error type for the run case use case.
#[derive(Debug, Clone, Error)]
pub enum RunCaseError {
    /// The case could not be turned into a request.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// The declared body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidBody(String),

    /// HTTP request failed.
    #[error("{0}")]
    HttpError(#[from] HttpClientError),
}

impl RunCaseError {
    /// Maps this error to the transport failure category used in reports.
    #[must_use]
    pub const fn to_error_kind(&self) -> TransportErrorKind {
        match self {
            Self::Domain(_) => TransportErrorKind::InvalidUrl,
            Self::InvalidBody(_) => TransportErrorKind::InvalidBody,
            Self::HttpError(e) => e.to_error_kind(),
        }
    }
}

/// Use case for running one test case.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(ReqwestHttpClient::new()?);
/// let base = BaseAddress::parse("https://jsonplaceholder.typicode.com")?;
/// let run_case = RunCase::new(client, base);
///
/// let case = TestCase::get("GET /posts/2", "/posts/2").expect(Assertion::status(200));
/// let report = run_case.run(&case).await;
/// ```
pub struct RunCase<C: HttpClient> {
    client: Arc<C>,
    base: BaseAddress,
    timeout_ms: u64,
}

impl<C: HttpClient> RunCase<C> {
    /// Creates a new `RunCase` with the default request timeout.
    pub const fn new(client: Arc<C>, base: BaseAddress) -> Self {
        Self {
            client,
            base,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the base address cases resolve against.
    pub const fn base(&self) -> &BaseAddress {
        &self.base
    }

    /// Sends the request declared by `case` and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns `RunCaseError` when the request cannot be built or no
    /// response arrives. Non-2xx responses are not errors.
    pub async fn dispatch(&self, case: &TestCase) -> DispatchResult {
        let request = case.to_request(&self.base, self.timeout_ms)?;
        request.body.validate().map_err(RunCaseError::InvalidBody)?;

        debug!(
            method = %request.method,
            host = request.host(),
            url = %request.url,
            "dispatching request"
        );
        let response = self.client.execute(&request).await?;
        Ok(response)
    }

    /// Runs `case` to completion and reports the outcome.
    ///
    /// Transport failures are reported, not returned: no assertions are
    /// evaluated for them.
    pub async fn run(&self, case: &TestCase) -> CaseReport {
        let start = Instant::now();

        let outcome = match self.dispatch(case).await {
            Ok(response) => CaseOutcome::Completed {
                status: response.status,
                results: evaluate(&response, &case.assertions),
            },
            Err(e) => CaseOutcome::TransportError {
                kind: e.to_error_kind(),
                message: e.to_string(),
            },
        };

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        let report = CaseReport::new(case, outcome, duration_ms);

        if report.passed() {
            info!(case = %case.name, duration_ms, "case passed");
        } else {
            warn!(
                case = %case.name,
                failure = ?report.failure_kind(),
                duration_ms,
                "case failed"
            );
        }

        report
    }
}
