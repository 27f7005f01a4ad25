//! Optional TOML settings file.
//!
//! Every key is optional; anything left out falls back to the
//! [`ReportRequest`] defaults. Command-line flags override the file.
//!
//! ```toml
//! tax_year = "2025-26"
//! income_ceiling = 3000000
//! scenarios = ["no-deductions", "high-deductions"]
//! display_metric = "net-income"
//! show_optimization = true
//! output_format = "csv"
//! log_level = "debug"
//! log_file = "tax-optimizer.log"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::calculations::ReportRequest;
use tax_core::{DisplayMetric, Scenario};
use thiserror::Error;
use tracing::debug;

use crate::output::OutputFormat;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tax-optimizer.toml";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub tax_year: Option<String>,
    pub income_ceiling: Option<Decimal>,
    pub scenarios: Option<Vec<Scenario>>,
    pub display_metric: Option<DisplayMetric>,
    pub show_optimization: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads settings from `path`, or from [`DEFAULT_CONFIG_FILE`] when
    /// `path` is `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) if !required && source.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// The report these settings ask for, before command-line overrides.
    pub fn report_request(&self) -> ReportRequest {
        let defaults = ReportRequest::default();
        ReportRequest {
            tax_year: self.tax_year.clone().unwrap_or(defaults.tax_year),
            income_ceiling: self.income_ceiling.unwrap_or(defaults.income_ceiling),
            scenarios: self.scenarios.clone().unwrap_or(defaults.scenarios),
            display_metric: self.display_metric.unwrap_or(defaults.display_metric),
            optimization_enabled: self
                .show_optimization
                .unwrap_or(defaults.optimization_enabled),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
