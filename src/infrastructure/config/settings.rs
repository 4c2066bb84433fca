//! Bootstrapper settings loading and validation.
//!
//! Settings come from an optional `setup.toml` in the project root, then
//! environment variables, then CLI flags (applied by the caller). Every
//! field has a default, so a missing file is not an error.
//!
//! # Example
//!
//! ```no_run
//! use assistant_setup::infrastructure::config::settings::Settings;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut settings = Settings::load("setup.toml")?;
//!     settings.apply_env_overrides()?;
//!     settings.logging.init(0);
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::domain::{InstallPolicy, VersionRequirement};
use crate::error::{Result, SettingsError};

/// Overrides `python.candidates` with a single interpreter.
pub const ENV_PYTHON: &str = "ASSISTANT_SETUP_PYTHON";
/// Overrides `install.policy`.
pub const ENV_POLICY: &str = "ASSISTANT_SETUP_POLICY";

/// Interpreter discovery settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PythonSettings {
    /// Programs probed in order; the first matching one wins.
    pub candidates: Vec<String>,
    /// Minimum version, `MAJOR.MINOR`. The major version must match exactly.
    pub min_version: String,
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            candidates: vec!["python3".into(), "python".into()],
            min_version: "3.8".into(),
        }
    }
}

/// Dependency install settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstallSettings {
    pub policy: InstallPolicy,
    /// Skip the optional visualization tier entirely.
    pub skip_optional: bool,
    /// Extra arguments appended to every `pip install` (index URL, proxy, ...).
    pub pip_args: Vec<String>,
}

/// Top-level bootstrapper settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub python: PythonSettings,
    pub install: InstallSettings,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Parse settings from TOML content and validate them.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(SettingsError::ReadFile(e).into()),
        }
    }

    /// Apply `ASSISTANT_SETUP_*` environment overrides.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in
    /// production, a map in tests).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(python) = lookup(ENV_PYTHON).filter(|v| !v.trim().is_empty()) {
            self.python.candidates = vec![python.trim().to_string()];
        }
        if let Some(policy) = lookup(ENV_POLICY).filter(|v| !v.trim().is_empty()) {
            self.install.policy = policy.parse().map_err(|reason| SettingsError::InvalidValue {
                field: "install.policy",
                reason,
            })?;
        }
        self.validate()
    }

    /// Parsed interpreter requirement.
    pub fn requirement(&self) -> Result<VersionRequirement> {
        self.python
            .min_version
            .parse()
            .map_err(|reason| SettingsError::InvalidValue {
                field: "python.min_version",
                reason,
            })
            .map_err(Into::into)
    }

    fn validate(&self) -> Result<()> {
        if self.python.candidates.is_empty()
            || self.python.candidates.iter().any(|c| c.trim().is_empty())
        {
            return Err(SettingsError::InvalidValue {
                field: "python.candidates",
                reason: "must list at least one non-empty program name".to_string(),
            }
            .into());
        }
        self.requirement()?;
        self.logging.validate()?;
        Ok(())
    }
}
