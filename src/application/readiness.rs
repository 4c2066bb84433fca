//! Readiness assessment of a configuration document.
//!
//! The bootstrapper writes inert defaults; before the assistant is started
//! against a live account the operator has to fill in credentials and keep
//! the referenced directories in place. Errors block a live start, warnings
//! are informational.

use crate::domain::{AssistantConfig, Layout};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readiness {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Readiness {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check `config` against the workspace under `layout`.
#[must_use]
pub fn assess(config: &AssistantConfig, layout: &Layout) -> Readiness {
    let mut readiness = Readiness::default();

    let missing = config.okx.missing_credentials();
    if !missing.is_empty() {
        let message = format!("{} not set", missing.join(", "));
        if config.okx.test_net {
            readiness.warnings.push(message);
        } else {
            readiness
                .errors
                .push(format!("{message}; required when okx.test_net is false"));
        }
    }
    if !config.okx.test_net && config.okx.use_virtual_account {
        readiness
            .warnings
            .push("okx.use_virtual_account is ignored on the live network".to_string());
    }

    for (field, relative) in [
        ("database.path", config.database.path.as_str()),
        ("learning.model_path", config.learning.model_path.as_str()),
    ] {
        if relative.trim().is_empty() {
            readiness.errors.push(format!("{field} is empty"));
        } else if !layout.resolve(relative).is_dir() {
            readiness
                .errors
                .push(format!("{field} '{relative}' is not an existing directory"));
        }
    }

    if config.discord.enabled && config.discord.webhook_url.trim().is_empty() {
        readiness
            .errors
            .push("discord.enabled is true but discord.webhook_url is empty".to_string());
    }

    if config.monitor.check_interval_seconds == 0 {
        readiness
            .errors
            .push("monitor.check_interval_seconds must be greater than 0".to_string());
    }

    if config.smc_strategy.enabled_pairs.is_empty() {
        readiness
            .warnings
            .push("smc_strategy.enabled_pairs is empty".to_string());
    }

    let copy = &config.copy_trading;
    if copy.risk_multiplier.is_nan() || copy.risk_multiplier <= 0.0 {
        readiness
            .errors
            .push("copy_trading.risk_multiplier must be greater than 0".to_string());
    }
    if copy.enabled && copy.max_copied_traders == 0 {
        readiness.warnings.push(
            "copy_trading.enabled is true but max_copied_traders is 0".to_string(),
        );
    }

    readiness
}
