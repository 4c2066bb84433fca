//! Per-step outcomes collected during a bootstrap run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::package::{Package, Tier};
use super::runtime::RuntimeInfo;

/// Result of installing one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallOutcome {
    /// Pinned install succeeded.
    Installed,
    /// Pinned install failed, the fallback succeeded.
    FallbackUsed { primary_error: String },
    /// No strategy succeeded.
    Failed {
        reason: String,
        fallback_attempted: bool,
    },
    /// Not attempted (optional tier disabled).
    Skipped,
}

impl InstallOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The package ended up installed, pinned or through its fallback.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed | Self::FallbackUsed { .. })
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::FallbackUsed { .. } => "installed (fallback)",
            Self::Failed { .. } => "failed",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageResult {
    pub name: &'static str,
    pub version: &'static str,
    pub tier: Tier,
    pub outcome: InstallOutcome,
}

impl PackageResult {
    #[must_use]
    pub fn new(package: &Package, outcome: InstallOutcome) -> Self {
        Self {
            name: package.name,
            version: package.version,
            tier: package.tier,
            outcome,
        }
    }
}

/// Ordered per-package results for the whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub packages: Vec<PackageResult>,
}

impl InstallReport {
    pub fn push(&mut self, result: PackageResult) {
        self.packages.push(result);
    }

    pub fn failures(&self) -> impl Iterator<Item = &PackageResult> {
        self.packages.iter().filter(|p| p.outcome.is_failure())
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    #[must_use]
    pub fn is_installed(&self, name: &str) -> bool {
        self.packages
            .iter()
            .any(|p| p.name == name && p.outcome.is_installed())
    }

    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.packages
            .iter()
            .filter(|p| matches!(p.outcome, InstallOutcome::FallbackUsed { .. }))
            .count()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryStatus {
    Created,
    Existing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryOutcome {
    pub path: PathBuf,
    pub status: DirectoryStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigStatus {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigOutcome {
    pub path: PathBuf,
    pub status: ConfigStatus,
}

/// What the smoke test verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeReport {
    pub imported: Vec<&'static str>,
    pub config: PathBuf,
}

/// Aggregate of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct SetupReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub runtime: RuntimeInfo,
    pub installs: InstallReport,
    pub directories: Vec<DirectoryOutcome>,
    pub config: ConfigOutcome,
    pub smoke: SmokeReport,
}

impl SetupReport {
    /// Directories created by this run.
    #[must_use]
    pub fn created_directories(&self) -> usize {
        self.directories
            .iter()
            .filter(|d| d.status == DirectoryStatus::Created)
            .count()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
