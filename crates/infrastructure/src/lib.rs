//! Probe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading,
//! report rendering, and tracing setup.

pub mod adapters;
pub mod report;
pub mod settings;
pub mod telemetry;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use report::{ReportError, render, render_json, render_text};
pub use settings::{ConfigError, ProbeConfig, ReportFormat};
pub use telemetry::init_tracing;
