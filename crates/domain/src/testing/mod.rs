//! Response testing and assertions.
//!
//! This module provides types for declaring test cases, the assertions their
//! responses must satisfy, and the reports produced by running them.

mod assertion;
mod case;
mod evaluate;
mod field;
mod operator;
mod report;

pub use assertion::{Assertion, AssertionResult};
pub use case::{Category, TestCase};
pub use evaluate::{evaluate, evaluate_one};
pub use field::{BodyPath, FieldPath, FindFilter, Segment};
pub use operator::ComparisonOperator;
pub use report::{CaseOutcome, CaseReport, FailureKind, RunReport, TransportErrorKind};
