//! Comparison operators for assertions.

use std::cmp::Ordering;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a resolved value is compared with an assertion's expected value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
    /// Substring, array element, or object key.
    Contains,
    /// Matches regex pattern.
    Matches,
    /// Not null and not an empty string, array or object. Ignores the expected value.
    NotEmpty,
    /// Every element of an array satisfies the inner operator.
    ///
    /// Holds trivially for an empty array.
    EveryItem(Box<ComparisonOperator>),
}

impl ComparisonOperator {
    /// Wraps an operator so it applies to every element of a sequence.
    #[must_use]
    pub fn every_item(inner: Self) -> Self {
        Self::EveryItem(Box::new(inner))
    }

    /// Returns true if this operator ignores the expected value.
    #[must_use]
    pub fn is_unary(&self) -> bool {
        match self {
            Self::NotEmpty => true,
            Self::EveryItem(inner) => inner.is_unary(),
            _ => false,
        }
    }

    /// Get the symbol for this operator.
    #[must_use]
    pub fn symbol(&self) -> String {
        match self {
            Self::Equals => "==".to_string(),
            Self::NotEquals => "!=".to_string(),
            Self::GreaterThan => ">".to_string(),
            Self::GreaterThanOrEqual => ">=".to_string(),
            Self::LessThan => "<".to_string(),
            Self::LessThanOrEqual => "<=".to_string(),
            Self::Contains => "contains".to_string(),
            Self::Matches => "matches".to_string(),
            Self::NotEmpty => "is not empty".to_string(),
            Self::EveryItem(inner) => format!("every item {}", inner.symbol()),
        }
    }

    /// Compares `actual` against `expected`.
    ///
    /// # Errors
    ///
    /// Returns a message when the comparison itself cannot be carried out,
    /// e.g. an invalid regex pattern. A value that merely does not satisfy the
    /// operator is `Ok(false)`.
    pub fn compare(&self, actual: &Value, expected: &Value) -> Result<bool, String> {
        let matched = match self {
            Self::Equals => json_eq(actual, expected),
            Self::NotEquals => !json_eq(actual, expected),
            Self::GreaterThan => ordering(actual, expected).is_some_and(Ordering::is_gt),
            Self::GreaterThanOrEqual => ordering(actual, expected).is_some_and(Ordering::is_ge),
            Self::LessThan => ordering(actual, expected).is_some_and(Ordering::is_lt),
            Self::LessThanOrEqual => ordering(actual, expected).is_some_and(Ordering::is_le),
            Self::Contains => contains(actual, expected),
            Self::Matches => {
                let Value::String(pattern) = expected else {
                    return Err(format!("regex pattern must be a string, got {expected}"));
                };
                let regex = Regex::new(pattern)
                    .map_err(|e| format!("invalid regex pattern '{pattern}': {e}"))?;
                matches!(actual, Value::String(s) if regex.is_match(s))
            }
            Self::NotEmpty => match actual {
                Value::Null => false,
                Value::String(s) => !s.is_empty(),
                Value::Array(items) => !items.is_empty(),
                Value::Object(map) => !map.is_empty(),
                Value::Bool(_) | Value::Number(_) => true,
            },
            Self::EveryItem(inner) => {
                let Value::Array(items) = actual else {
                    return Ok(false);
                };
                for item in items {
                    if !inner.compare(item, expected)? {
                        return Ok(false);
                    }
                }
                true
            }
        };
        Ok(matched)
    }
}

/// JSON equality where numbers compare by value, so `2` equals `2.0`.
pub(crate) fn json_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => {
            a == b || matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => actual == expected,
    }
}

fn ordering(actual: &Value, expected: &Value) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
        (Value::Array(items), _) => items.iter().any(|item| json_eq(item, expected)),
        (Value::Object(map), Value::String(key)) => map.contains_key(key),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn check(op: &ComparisonOperator, actual: &Value, expected: &Value) -> bool {
        op.compare(actual, expected).unwrap()
    }

    #[test]
    fn test_equals_numbers_by_value() {
        assert!(check(&ComparisonOperator::Equals, &json!(2), &json!(2)));
        assert!(check(&ComparisonOperator::Equals, &json!(2.0), &json!(2)));
        assert!(!check(&ComparisonOperator::Equals, &json!("2"), &json!(2)));
        assert!(check(&ComparisonOperator::NotEquals, &json!(3), &json!(2)));
    }

    #[test]
    fn test_ordering() {
        assert!(check(&ComparisonOperator::GreaterThan, &json!(5), &json!(0)));
        assert!(!check(&ComparisonOperator::GreaterThan, &json!(0), &json!(0)));
        assert!(check(&ComparisonOperator::GreaterThanOrEqual, &json!(0), &json!(0)));
        assert!(check(&ComparisonOperator::LessThan, &json!(1.5), &json!(2)));
        assert!(check(&ComparisonOperator::LessThanOrEqual, &json!("a"), &json!("b")));
        assert!(!check(&ComparisonOperator::GreaterThan, &Value::Null, &json!(0)));
    }

    #[test]
    fn test_contains() {
        assert!(check(&ComparisonOperator::Contains, &json!("Eliseo@gardner.biz"), &json!("@")));
        assert!(check(&ComparisonOperator::Contains, &json!([1, 2]), &json!(2)));
        assert!(check(&ComparisonOperator::Contains, &json!({"id": 1}), &json!("id")));
        assert!(!check(&ComparisonOperator::Contains, &Value::Null, &json!("x")));
    }

    #[test]
    fn test_matches() {
        assert!(check(&ComparisonOperator::Matches, &json!("ID: 12345"), &json!(r"ID: \d+")));
        assert!(!check(&ComparisonOperator::Matches, &json!(12345), &json!(r"\d+")));

        let err = ComparisonOperator::Matches.compare(&json!("x"), &json!("("));
        assert!(err.unwrap_err().contains("invalid regex"));
    }

    #[test]
    fn test_not_empty() {
        let op = ComparisonOperator::NotEmpty;
        assert!(check(&op, &json!("title"), &Value::Null));
        assert!(check(&op, &json!(0), &Value::Null));
        assert!(!check(&op, &json!(""), &Value::Null));
        assert!(!check(&op, &Value::Null, &Value::Null));
        assert!(!check(&op, &json!([]), &Value::Null));
        assert!(!check(&op, &json!({}), &Value::Null));
        assert!(op.is_unary());
    }

    #[test]
    fn test_every_item() {
        let op = ComparisonOperator::every_item(ComparisonOperator::Equals);
        assert!(check(&op, &json!([2, 2, 2]), &json!(2)));
        assert!(!check(&op, &json!([2, 3]), &json!(2)));
        assert!(!check(&op, &json!(2), &json!(2)));
    }

    #[test]
    fn test_every_item_on_empty_sequence_passes() {
        let op = ComparisonOperator::every_item(ComparisonOperator::Equals);
        assert!(check(&op, &json!([]), &json!(2)));

        let op = ComparisonOperator::every_item(ComparisonOperator::GreaterThan);
        assert!(check(&op, &json!([]), &json!(1_000)));
    }

    #[test]
    fn test_symbol() {
        assert_eq!(ComparisonOperator::Equals.symbol(), "==");
        assert_eq!(
            ComparisonOperator::every_item(ComparisonOperator::Equals).symbol(),
            "every item =="
        );
    }

    #[test]
    fn test_serde_shape() {
        let op = ComparisonOperator::every_item(ComparisonOperator::Equals);
        assert_eq!(serde_json::to_value(&op).unwrap(), json!({"every_item": "equals"}));
        assert_eq!(
            serde_json::to_value(ComparisonOperator::NotEmpty).unwrap(),
            json!("not_empty")
        );
    }
}
