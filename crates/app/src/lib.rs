//! Probe - declarative HTTP assertion runner.
//!
//! Wires the JSONPlaceholder catalog to the reqwest adapter and runs it
//! against the configured base address.

pub mod catalog;

use std::sync::Arc;

use probe_application::{ApplicationError, ApplicationResult, RunCase, RunSuite};
use probe_domain::RunReport;
use probe_infrastructure::{ProbeConfig, ReqwestHttpClient, SystemClock};

pub use catalog::jsonplaceholder_cases;

/// Exit code when every case passed.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code when at least one case failed.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code when the run could not start.
pub const EXIT_SETUP_ERROR: u8 = 2;

/// Loads configuration from `probe.toml` and `PROBE_*` variables.
///
/// # Errors
///
/// Returns `ApplicationError::Config` if configuration is missing or invalid.
pub fn load_config() -> ApplicationResult<ProbeConfig> {
    ProbeConfig::load().map_err(|e| ApplicationError::Config(e.to_string()))
}

/// Runs the catalog against `config.base_address`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the catalog is
/// malformed. Failing cases are reported, not returned.
pub async fn run(config: &ProbeConfig) -> ApplicationResult<RunReport> {
    let cases = jsonplaceholder_cases()?;
    let client = Arc::new(ReqwestHttpClient::new()?);

    let run_case =
        RunCase::new(client, config.base_address.clone()).with_timeout_ms(config.timeout_ms);
    let suite =
        RunSuite::new(run_case, Arc::new(SystemClock::new())).with_category(config.category);

    Ok(suite.run(&cases).await)
}

/// Maps a finished run to the process exit code.
#[must_use]
pub const fn exit_code(report: &RunReport) -> u8 {
    if report.all_passed() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}
