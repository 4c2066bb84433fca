//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::SettingsError;

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Logs go to stderr; stdout belongs to the CLI output. `RUST_LOG` wins
    /// over everything, then `-v` flags (`1` = debug, `2+` = trace), then the
    /// configured level.
    pub fn init(&self, verbosity: u8) {
        let level = match verbosity {
            0 => self.level.as_str(),
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        // A subscriber may already be installed (tests, embedding); keep it.
        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init(),
        };
    }

    pub(crate) fn validate(&self) -> Result<(), SettingsError> {
        if !matches!(self.format.as_str(), "pretty" | "json") {
            return Err(SettingsError::InvalidValue {
                field: "logging.format",
                reason: format!("'{}' is not one of pretty, json", self.format),
            });
        }
        if EnvFilter::try_new(&self.level).is_err() {
            return Err(SettingsError::InvalidValue {
                field: "logging.level",
                reason: format!("'{}' is not a valid filter directive", self.level),
            });
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}
