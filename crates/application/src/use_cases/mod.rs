//! Use cases (application services)
//!
//! Each use case orchestrates domain types and ports for one operation.

mod run_case;
mod run_suite;

pub use run_case::{DispatchResult, RunCase, RunCaseError};
pub use run_suite::RunSuite;
