//! How install failures affect the rest of the run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Failure policy for the dependency install step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallPolicy {
    /// Record failures and keep going; the smoke test is the real gate.
    #[default]
    Lenient,
    /// Abort on the first package that could not be installed.
    Strict,
}

impl FromStr for InstallPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown install policy '{other}' (expected lenient or strict)")),
        }
    }
}

impl fmt::Display for InstallPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}
