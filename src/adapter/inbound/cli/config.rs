//! Handler for the `config` command group.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::{document, readiness};
use crate::domain::layout::NEXT_STEP;
use crate::domain::{AssistantConfig, Layout};
use crate::error::{Error, Result};

/// Execute `config show`.
pub fn execute_show(layout: &Layout) -> Result<()> {
    let path = layout.config_file();
    let config = document::load_config(&path)?;

    if output::is_json() {
        output::report("config", redacted(&config));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    output::field("Project", &config.project_name);
    output::field("Version", &config.version);
    output::field("Author", &config.author);

    output::section("OKX");
    output::field("API key", secret(&config.okx.api_key));
    output::field("Secret", secret(&config.okx.secret_key));
    output::field("Passphrase", secret(&config.okx.passphrase));
    output::field("Testnet", config.okx.test_net);
    output::field("Virtual", config.okx.use_virtual_account);

    output::section("Storage");
    output::field("Database", &config.database.path);
    output::field("Backup", config.database.auto_backup);
    output::field("Models", &config.learning.model_path);

    output::section("Strategy");
    if config.smc_strategy.enabled_pairs.is_empty() {
        output::note("(no pairs enabled)");
    } else {
        output::field("Pairs", config.smc_strategy.enabled_pairs.join(", "));
    }
    output::field("Timeframe", &config.smc_strategy.timeframe);

    output::section("Services");
    output::field("Discord", enabled(config.discord.enabled));
    output::field(
        "Monitor",
        format!(
            "{} (every {}s)",
            enabled(config.monitor.enabled),
            config.monitor.check_interval_seconds
        ),
    );
    output::field("Learning", enabled(config.learning.enabled));
    output::field(
        "Copy trade",
        format!(
            "{} (max {}, x{})",
            enabled(config.copy_trading.enabled),
            config.copy_trading.max_copied_traders,
            config.copy_trading.risk_multiplier
        ),
    );
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(layout: &Layout) -> Result<()> {
    let path = layout.config_file();
    let config = document::load_config(&path)?;
    let readiness = readiness::assess(&config, layout);

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Document is valid JSON");

    for warning in &readiness.warnings {
        output::warning(warning);
    }
    for error in &readiness.errors {
        output::error(error);
    }
    output::report(
        "readiness",
        json!({
            "ready": readiness.is_ready(),
            "errors": readiness.errors,
            "warnings": readiness.warnings,
        }),
    );

    if !readiness.is_ready() {
        return Err(Error::Validation(readiness.errors.join("; ")));
    }

    output::success("Configuration is ready");
    output::hint(&format!("start the assistant with `{NEXT_STEP}`"));
    Ok(())
}

fn secret(value: &str) -> String {
    if value.trim().is_empty() {
        output::muted("(not set)")
    } else {
        "********".to_string()
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}

/// The document as JSON with credentials masked.
fn redacted(config: &AssistantConfig) -> serde_json::Value {
    let mut config = config.clone();
    for value in [
        &mut config.okx.api_key,
        &mut config.okx.secret_key,
        &mut config.okx.passphrase,
    ] {
        if !value.trim().is_empty() {
            *value = "********".to_string();
        }
    }
    if !config.discord.webhook_url.is_empty() {
        config.discord.webhook_url = "********".to_string();
    }
    serde_json::to_value(&config).unwrap_or_else(|_| json!({}))
}
