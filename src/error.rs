use std::path::PathBuf;

use thiserror::Error;

/// Runtime discovery failures. Always fatal.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("no Python {requirement} interpreter found (tried: {})", tried.join(", "))]
    NotFound {
        requirement: String,
        tried: Vec<String>,
    },

    #[error("{program} reports Python {found}, but Python {requirement} is required")]
    Unsupported {
        program: String,
        found: String,
        requirement: String,
    },
}

/// Dependency installation failures surfaced under the strict policy.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("failed to install {package}: {reason}")]
    Failed { package: String, reason: String },
}

/// Smoke test failures. Always fatal.
#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("failed to import {module}: {reason}")]
    Import { module: String, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        contents: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value in {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        contents: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Bootstrapper settings errors (`setup.toml` and environment overrides).
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read settings file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Workspace scaffolding errors.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("{} exists but is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Smoke(#[from] SmokeError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("configuration is not ready: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
