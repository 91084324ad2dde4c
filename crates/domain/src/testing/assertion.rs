//! Assertions and their results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::field::FieldPath;
use super::operator::ComparisonOperator;
use crate::error::DomainResult;
use crate::request::JSON_CONTENT_TYPE;

/// A single expected-vs-actual check over one response field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assertion {
    /// Where the actual value comes from.
    pub field: FieldPath,
    /// How actual and expected are compared.
    pub operator: ComparisonOperator,
    /// Expected value; `null` for unary operators.
    #[serde(default)]
    pub expected: Value,
}

impl Assertion {
    /// Creates an assertion from its three parts.
    #[must_use]
    pub fn new(field: FieldPath, operator: ComparisonOperator, expected: impl Into<Value>) -> Self {
        Self {
            field,
            operator,
            expected: expected.into(),
        }
    }

    /// Status code equals `code`.
    #[must_use]
    pub fn status(code: u16) -> Self {
        Self::new(FieldPath::Status, ComparisonOperator::Equals, code)
    }

    /// `Content-Type` header declares JSON.
    #[must_use]
    pub fn content_type_json() -> Self {
        Self::new(
            FieldPath::ContentType,
            ComparisonOperator::Contains,
            JSON_CONTENT_TYPE,
        )
    }

    /// Body selector compared with `operator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot be parsed.
    pub fn body(
        selector: &str,
        operator: ComparisonOperator,
        expected: impl Into<Value>,
    ) -> DomainResult<Self> {
        Ok(Self::new(FieldPath::body(selector)?, operator, expected))
    }

    /// Body selector equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot be parsed.
    pub fn body_equals(selector: &str, expected: impl Into<Value>) -> DomainResult<Self> {
        Self::body(selector, ComparisonOperator::Equals, expected)
    }

    /// Body selector resolves to something non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot be parsed.
    pub fn body_not_empty(selector: &str) -> DomainResult<Self> {
        Self::body(selector, ComparisonOperator::NotEmpty, Value::Null)
    }

    /// Returns true if this checks the status code.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self.field, FieldPath::Status)
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        if self.operator.is_unary() {
            format!("{} {}", self.field, self.operator.symbol())
        } else {
            format!("{} {} {}", self.field, self.operator.symbol(), self.expected)
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Value the field path resolved to.
    pub actual: Value,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion, actual: Value) -> Self {
        Self {
            assertion,
            passed: true,
            actual,
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, actual: Value, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual,
            error: Some(error.into()),
        }
    }

    /// Returns true if this is a failed status-code check.
    #[must_use]
    pub const fn is_unexpected_status(&self) -> bool {
        !self.passed && self.assertion.is_status()
    }
}
