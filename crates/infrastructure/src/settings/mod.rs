//! Runner configuration.
//!
//! Values are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `PROBE_*` environment variables.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment, File, Map};
use probe_domain::request::DEFAULT_TIMEOUT_MS;
use probe_domain::{BaseAddress, Category};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "PROBE_CONFIG";

/// Configuration file read when `PROBE_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "probe.toml";

const ENV_PREFIX: &str = "PROBE";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// No base URL was configured.
    #[error("base_url is required (set PROBE_BASE_URL or base_url in probe.toml)")]
    MissingBaseUrl,

    /// A value was present but unusable.
    #[error("invalid value for '{key}': {message}")]
    Invalid {
        /// Configuration key.
        key: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl ToString) -> Self {
        Self::Invalid {
            key,
            message: message.to_string(),
        }
    }
}

/// How the run report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human readable summary.
    #[default]
    Text,
    /// Structured JSON report.
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Fully resolved runner configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Root URL every case path is resolved against.
    pub base_address: BaseAddress,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Optional category filter.
    pub category: Option<Category>,
    /// Report output format.
    pub report_format: ReportFormat,
}

impl ProbeConfig {
    /// Loads configuration from the process environment.
    ///
    /// The file named by `PROBE_CONFIG`, or `probe.toml` in the working
    /// directory, is read if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed, `base_url` is
    /// missing, or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        Self::from_sources(Some(&path), None)
    }

    /// Loads configuration from an optional file and an environment map.
    ///
    /// When `env` is `None` the process environment is used.
    ///
    /// # Errors
    ///
    /// Same as [`ProbeConfig::load`].
    pub fn from_sources(
        file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().set_default("timeout_ms", DEFAULT_TIMEOUT_MS)?;
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?;

        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self, ConfigError> {
        let base_url = optional(settings, "base_url")?
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let base_address = BaseAddress::parse(base_url.trim())
            .map_err(|e| ConfigError::invalid("base_url", e))?;

        let timeout_ms = match optional(settings, "timeout_ms")? {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| {
                    ConfigError::invalid(
                        "timeout_ms",
                        format!("expected a positive integer, got '{raw}'"),
                    )
                })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let category = optional(settings, "category")?
            .map(|raw| raw.parse::<Category>())
            .transpose()
            .map_err(|e| ConfigError::invalid("category", e))?;

        let report_format = optional(settings, "report_format")?
            .map(|raw| raw.parse::<ReportFormat>())
            .transpose()
            .map_err(|e| ConfigError::invalid("report_format", e))?
            .unwrap_or_default();

        Ok(Self {
            base_address,
            timeout_ms,
            category,
            report_format,
        })
    }
}

fn optional(settings: &Config, key: &str) -> Result<Option<String>, ConfigError> {
    match settings.get_string(key) {
        Ok(value) => Ok(Some(value)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
