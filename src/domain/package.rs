//! Dependency packages, tiers and install strategies.

use std::fmt;

use serde::Serialize;

/// Logical grouping of dependencies installed together, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Networking client, date utilities, parallel-job helper.
    Core,
    /// Numeric arrays, dataframes, plotting, general ML.
    DataAnalysis,
    /// Unified exchange API client.
    ExchangeConnectivity,
    /// Interactive and statistical plotting.
    Optional,
}

impl Tier {
    /// Human-readable label used in console output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::DataAnalysis => "data-analysis",
            Self::ExchangeConnectivity => "exchange-connectivity",
            Self::Optional => "optional",
        }
    }

    /// Whether the smoke test imports packages of this tier regardless of
    /// how their install went. Optional packages are imported only when
    /// installed.
    #[must_use]
    pub const fn is_verified(self) -> bool {
        !matches!(self, Self::Optional)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Alternate strategy tried once when the pinned install fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Drop the version pin and prefer prebuilt wheels.
    UnpinnedPreferBinary,
}

/// How a single install invocation is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStrategy {
    /// `name==version`.
    Pinned,
    /// The package's fallback strategy.
    Fallback(Fallback),
}

/// A version-pinned dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Distribution name passed to pip.
    pub name: &'static str,
    /// Exact version.
    pub version: &'static str,
    /// Module name used by the smoke test.
    pub import_name: &'static str,
    pub tier: Tier,
    pub fallback: Option<Fallback>,
}

impl Package {
    #[must_use]
    pub const fn new(
        name: &'static str,
        version: &'static str,
        import_name: &'static str,
        tier: Tier,
    ) -> Self {
        Self {
            name,
            version,
            import_name,
            tier,
            fallback: None,
        }
    }

    #[must_use]
    pub const fn with_fallback(self, fallback: Fallback) -> Self {
        Self {
            fallback: Some(fallback),
            ..self
        }
    }

    /// Requirement specifier for the pinned install, e.g. `numpy==1.24.3`.
    #[must_use]
    pub fn requirement(&self) -> String {
        format!("{}=={}", self.name, self.version)
    }

    /// Arguments following `<python> -m pip install` for the given strategy.
    #[must_use]
    pub fn install_args(&self, strategy: InstallStrategy) -> Vec<String> {
        match strategy {
            InstallStrategy::Pinned => vec![self.requirement()],
            InstallStrategy::Fallback(Fallback::UnpinnedPreferBinary) => {
                vec![self.name.to_string(), "--prefer-binary".to_string()]
            }
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
