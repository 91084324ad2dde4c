//! Evaluation of assertion lists against a response.

use super::assertion::{Assertion, AssertionResult};
use crate::response::ResponseSpec;

/// Evaluates every assertion against `response`, in declared order.
///
/// Collect-all: a failing assertion never short-circuits the rest, so the
/// result holds exactly one entry per assertion.
#[must_use]
pub fn evaluate(response: &ResponseSpec, assertions: &[Assertion]) -> Vec<AssertionResult> {
    assertions
        .iter()
        .map(|assertion| evaluate_one(response, assertion))
        .collect()
}

/// Evaluates a single assertion.
#[must_use]
pub fn evaluate_one(response: &ResponseSpec, assertion: &Assertion) -> AssertionResult {
    let actual = assertion.field.resolve(response);

    match assertion.operator.compare(&actual, &assertion.expected) {
        Ok(true) => AssertionResult::pass(assertion.clone(), actual),
        Ok(false) => {
            let message = if assertion.is_status() {
                format!("Expected status {}, got {}", assertion.expected, actual)
            } else {
                format!("Expected {}, but was {}", assertion.description(), actual)
            };
            AssertionResult::fail(assertion.clone(), actual, message)
        }
        Err(e) => AssertionResult::fail(assertion.clone(), actual, e),
    }
}
