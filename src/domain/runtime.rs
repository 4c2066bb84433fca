//! Interpreter version parsing and requirement matching.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Where to send operators who have no suitable interpreter.
pub const DOWNLOAD_URL: &str = "https://www.python.org/downloads/";

/// A `major.minor[.patch]` interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the version from `--version` output such as `Python 3.11.4`.
    ///
    /// Pre-release suffixes (`3.13.0rc1`) are ignored.
    #[must_use]
    pub fn from_banner(text: &str) -> Option<Self> {
        text.split_whitespace()
            .skip_while(|word| !word.eq_ignore_ascii_case("python"))
            .nth(1)
            .and_then(|word| word.parse().ok())
    }
}

impl FromStr for PythonVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '.');
        let major = parse_component(parts.next(), s)?;
        let minor = parse_component(parts.next(), s)?;
        let patch = match parts.next() {
            Some(raw) => leading_number(raw).unwrap_or(0),
            None => 0,
        };
        Ok(Self::new(major, minor, patch))
    }
}

fn parse_component(part: Option<&str>, whole: &str) -> Result<u32, String> {
    part.and_then(leading_number)
        .ok_or_else(|| format!("expected MAJOR.MINOR, got '{whole}'"))
}

fn leading_number(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Same major version, at least the given minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRequirement {
    pub major: u32,
    pub min_minor: u32,
}

impl VersionRequirement {
    #[must_use]
    pub const fn new(major: u32, min_minor: u32) -> Self {
        Self { major, min_minor }
    }

    #[must_use]
    pub fn matches(&self, version: PythonVersion) -> bool {
        version.major == self.major && version.minor >= self.min_minor
    }
}

impl Default for VersionRequirement {
    fn default() -> Self {
        Self::new(3, 8)
    }
}

impl FromStr for VersionRequirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version: PythonVersion = s.trim().trim_end_matches('+').parse()?;
        Ok(Self::new(version.major, version.minor))
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}+", self.major, self.min_minor)
    }
}

/// The interpreter selected for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    /// Program name or path as invoked.
    pub program: String,
    pub version: PythonVersion,
}
