//! Declared test cases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::assertion::Assertion;
use crate::error::{DomainError, DomainResult};
use crate::request::{BaseAddress, HttpMethod, QueryParam, QueryParams, RequestBody, RequestSpec};

/// Whether a case exercises the happy path or an error/edge path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Expected to succeed.
    #[default]
    Positive,
    /// Probes error handling or service quirks.
    Negative,
}

impl Category {
    /// Returns the tag as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

/// One declared request plus the assertions its response must satisfy.
///
/// Cases are self-describing: nothing in one case refers to the outcome of
/// another, even when two of them target the same resource id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Display label.
    pub name: String,
    /// Tag used for filtering and reports.
    #[serde(default)]
    pub category: Category,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the base address, may include a literal id.
    pub path: String,
    /// Query parameters in declaration order.
    #[serde(default)]
    pub query: QueryParams,
    /// Request body.
    #[serde(default)]
    pub body: RequestBody,
    /// Assertions, evaluated in order.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Documents behaviour specific to the service under test.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TestCase {
    /// Creates a positive case with no query, body or assertions.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: Category::Positive,
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: RequestBody::None,
            assertions: Vec::new(),
            note: None,
        }
    }

    /// Creates a GET case.
    #[must_use]
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, path)
    }

    /// Creates a POST case.
    #[must_use]
    pub fn post(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Post, path)
    }

    /// Creates a PUT case.
    #[must_use]
    pub fn put(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Put, path)
    }

    /// Creates a PATCH case.
    #[must_use]
    pub fn patch(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Patch, path)
    }

    /// Creates a DELETE case.
    #[must_use]
    pub fn delete(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Delete, path)
    }

    /// Marks the case as negative.
    #[must_use]
    pub const fn negative(mut self) -> Self {
        self.category = Category::Negative;
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Sets a literal JSON body.
    #[must_use]
    pub fn with_json_body(mut self, json: impl Into<String>) -> Self {
        self.body = RequestBody::json(json);
        self
    }

    /// Attaches a note about service-specific behaviour.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Appends an assertion.
    #[must_use]
    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Builds the concrete request for this case.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base address.
    pub fn to_request(&self, base: &BaseAddress, timeout_ms: u64) -> DomainResult<RequestSpec> {
        let url = base.join(&self.path, &self.query)?;
        Ok(RequestSpec::new(self.method, url)
            .with_body(self.body.clone())
            .with_timeout_ms(timeout_ms))
    }
}
