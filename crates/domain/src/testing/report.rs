//! Case outcomes and run reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assertion::AssertionResult;
use super::case::{Category, TestCase};
use crate::request::HttpMethod;

/// Categories of transport failures, where no response was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    /// Invalid URL format.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish connection.
    ConnectionFailed,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Request timed out.
    Timeout,

    /// TLS/SSL error.
    TlsError,

    /// Invalid request body (e.g., malformed JSON).
    InvalidBody,

    /// Too many redirects.
    TooManyRedirects,

    /// Unknown or unexpected error.
    Unknown,
}

impl TransportErrorKind {
    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionFailed => "Connection Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::Timeout => "Request Timeout",
            Self::TlsError => "SSL/TLS Error",
            Self::InvalidBody => "Invalid Request Body",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::Unknown => "Unknown Error",
        }
    }
}

/// Why a case failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// No response; assertions were not evaluated.
    Transport(TransportErrorKind),
    /// The status-code assertion failed.
    UnexpectedStatus,
    /// Some other assertion failed.
    AssertionFailure,
}

/// What happened when a case ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// A response arrived and every assertion was evaluated.
    Completed {
        /// Status code received.
        status: u16,
        /// One result per declared assertion.
        results: Vec<AssertionResult>,
    },
    /// The request never produced a response.
    TransportError {
        /// Error category.
        kind: TransportErrorKind,
        /// Error details.
        message: String,
    },
}

/// Report for a single case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case display label.
    pub name: String,
    /// Case tag.
    pub category: Category,
    /// HTTP method used.
    pub method: HttpMethod,
    /// Case path as declared.
    pub path: String,
    /// Service-specific behaviour note carried from the case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Outcome.
    #[serde(flatten)]
    pub outcome: CaseOutcome,
    /// Wall time for the whole case in milliseconds.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Creates a report for `case`.
    #[must_use]
    pub fn new(case: &TestCase, outcome: CaseOutcome, duration_ms: u64) -> Self {
        Self {
            name: case.name.clone(),
            category: case.category,
            method: case.method,
            path: case.path.clone(),
            note: case.note.clone(),
            outcome,
            duration_ms,
        }
    }

    /// Returns true if a response arrived and every assertion passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        match &self.outcome {
            CaseOutcome::Completed { results, .. } => results.iter().all(|r| r.passed),
            CaseOutcome::TransportError { .. } => false,
        }
    }

    /// Returns the failing assertion results, in declared order.
    #[must_use]
    pub fn failures(&self) -> Vec<&AssertionResult> {
        match &self.outcome {
            CaseOutcome::Completed { results, .. } => {
                results.iter().filter(|r| !r.passed).collect()
            }
            CaseOutcome::TransportError { .. } => Vec::new(),
        }
    }

    /// Classifies the failure, if any.
    ///
    /// A failed status assertion wins over other assertion failures.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            CaseOutcome::TransportError { kind, .. } => Some(FailureKind::Transport(*kind)),
            CaseOutcome::Completed { results, .. } => {
                if results.iter().any(AssertionResult::is_unexpected_status) {
                    Some(FailureKind::UnexpectedStatus)
                } else if results.iter().any(|r| !r.passed) {
                    Some(FailureKind::AssertionFailure)
                } else {
                    None
                }
            }
        }
    }
}

/// Results from running an ordered list of cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Base address the cases ran against.
    pub base_address: String,
    /// When the first case started.
    pub started_at: DateTime<Utc>,
    /// When the last case finished.
    pub finished_at: DateTime<Utc>,
    /// Per-case reports in execution order.
    pub cases: Vec<CaseReport>,
    /// Total number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
}

impl RunReport {
    /// Create a new run report.
    #[must_use]
    pub fn new(
        base_address: impl Into<String>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        cases: Vec<CaseReport>,
    ) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.passed()).count();

        Self {
            base_address: base_address.into(),
            started_at,
            finished_at,
            cases,
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Check if all cases passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Looks up a case report by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }
}
