//! Probe Domain - Core types
//!
//! This crate defines the domain model for the Probe HTTP assertion runner.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod request;
pub mod response;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use request::{BaseAddress, HttpMethod, RequestBody, RequestSpec};
pub use response::ResponseSpec;
pub use testing::{
    Assertion, AssertionResult, CaseOutcome, CaseReport, Category, ComparisonOperator,
    FailureKind, FieldPath, RunReport, TestCase, TransportErrorKind, evaluate,
};
