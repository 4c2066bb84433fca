//! The fixed, ordered dependency manifest.

use super::package::{Fallback, Package, Tier};
use super::report::InstallReport;

/// Every dependency, in install order. Tiers are contiguous.
pub const PACKAGES: &[Package] = &[
    Package::new("requests", "2.31.0", "requests", Tier::Core),
    Package::new("python-dateutil", "2.8.2", "dateutil", Tier::Core),
    Package::new("joblib", "1.3.2", "joblib", Tier::Core),
    // Only numpy gets a second attempt; prebuilt wheels for the pinned
    // version are missing on some platforms.
    Package::new("numpy", "1.24.3", "numpy", Tier::DataAnalysis)
        .with_fallback(Fallback::UnpinnedPreferBinary),
    Package::new("pandas", "2.0.3", "pandas", Tier::DataAnalysis),
    Package::new("matplotlib", "3.7.2", "matplotlib", Tier::DataAnalysis),
    Package::new("scikit-learn", "1.3.0", "sklearn", Tier::DataAnalysis),
    Package::new("ccxt", "4.1.13", "ccxt", Tier::ExchangeConnectivity),
    Package::new("plotly", "5.17.0", "plotly", Tier::Optional),
    Package::new("seaborn", "0.12.2", "seaborn", Tier::Optional),
];

/// Tiers in install order.
pub const TIERS: [Tier; 4] = [
    Tier::Core,
    Tier::DataAnalysis,
    Tier::ExchangeConnectivity,
    Tier::Optional,
];

/// Packages belonging to one tier, in manifest order.
pub fn tier_packages(packages: &[Package], tier: Tier) -> impl Iterator<Item = &Package> {
    packages.iter().filter(move |pkg| pkg.tier == tier)
}

/// Import names that must load in any provisioned environment.
pub fn verified_imports(packages: &[Package]) -> Vec<&'static str> {
    packages
        .iter()
        .filter(|pkg| pkg.tier.is_verified())
        .map(|pkg| pkg.import_name)
        .collect()
}

/// Import names to load after an install run: the verified tiers plus every
/// optional package the run actually installed.
pub fn installed_imports(packages: &[Package], installs: &InstallReport) -> Vec<&'static str> {
    packages
        .iter()
        .filter(|pkg| pkg.tier.is_verified() || installs.is_installed(pkg.name))
        .map(|pkg| pkg.import_name)
        .collect()
}
