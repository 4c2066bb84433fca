//! Environment-agnostic domain types: the configuration document, the
//! dependency manifest, interpreter versions and run outcomes.

pub mod config;
pub mod layout;
pub mod manifest;
pub mod package;
pub mod policy;
pub mod report;
pub mod runtime;

pub use config::AssistantConfig;
pub use layout::Layout;
pub use package::{Fallback, InstallStrategy, Package, Tier};
pub use policy::InstallPolicy;
pub use report::{
    ConfigOutcome, ConfigStatus, DirectoryOutcome, DirectoryStatus, InstallOutcome,
    InstallReport, PackageResult, SetupReport, SmokeReport,
};
pub use runtime::{PythonVersion, RuntimeInfo, VersionRequirement};
