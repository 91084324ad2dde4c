//! Probe - Main Entry Point
//!
//! Loads configuration, runs the catalog, and prints the report to stdout.

use std::process::ExitCode;

use probe::{EXIT_FAILURE, EXIT_SETUP_ERROR};
use probe_infrastructure::{init_tracing, render};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    info!("Starting Probe v{}", env!("CARGO_PKG_VERSION"));

    let config = match probe::load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "cannot start run");
            return ExitCode::from(EXIT_SETUP_ERROR);
        }
    };

    let report = match probe::run(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "cannot start run");
            return ExitCode::from(EXIT_SETUP_ERROR);
        }
    };

    match render(&report, config.report_format) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            error!(error = %e, "failed to render report");
            return ExitCode::from(EXIT_FAILURE);
        }
    }

    ExitCode::from(probe::exit_code(&report))
}
