//! The assistant configuration document (`config/config.json`).
//!
//! Every section derives `Default` with the values written on first run, so
//! the document on disk is always a serialization of [`AssistantConfig::default`]
//! rather than a hand-maintained text template. Field order here is the key
//! order on disk.
//!
//! Sections use `#[serde(default)]` so that reading a user-edited document
//! with missing keys still yields a complete value for `config show`.

use serde::{Deserialize, Serialize};

/// Root of the configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub project_name: String,
    pub version: String,
    pub author: String,
    pub description: String,
    pub okx: OkxConfig,
    pub database: DatabaseConfig,
    pub smc_strategy: SmcStrategyConfig,
    pub discord: DiscordConfig,
    pub monitor: MonitorConfig,
    pub learning: LearningConfig,
    pub copy_trading: CopyTradingConfig,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            project_name: "幣圈交易輔助系統".into(),
            version: "3.0.0".into(),
            author: "交易者".into(),
            description: "加密貨幣交易輔助系統".into(),
            okx: OkxConfig::default(),
            database: DatabaseConfig::default(),
            smc_strategy: SmcStrategyConfig::default(),
            discord: DiscordConfig::default(),
            monitor: MonitorConfig::default(),
            learning: LearningConfig::default(),
            copy_trading: CopyTradingConfig::default(),
        }
    }
}

impl AssistantConfig {
    /// Serialize as UTF-8 JSON with four-space indentation.
    ///
    /// Non-ASCII text is written verbatim, not `\u`-escaped.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        buf.push(b'\n');
        // serde_json only ever emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// OKX exchange credentials. Empty and test-net by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OkxConfig {
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
    pub test_net: bool,
    pub use_virtual_account: bool,
}

impl Default for OkxConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            secret_key: String::new(),
            passphrase: String::new(),
            test_net: true,
            use_virtual_account: true,
        }
    }
}

impl OkxConfig {
    /// Names of credential fields that are still empty.
    #[must_use]
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push("okx.api_key");
        }
        if self.secret_key.trim().is_empty() {
            missing.push("okx.secret_key");
        }
        if self.passphrase.trim().is_empty() {
            missing.push("okx.passphrase");
        }
        missing
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub auto_backup: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/".into(),
            auto_backup: true,
        }
    }
}

/// Smart-money-concepts strategy settings. Pairs and timeframe are not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmcStrategyConfig {
    pub enabled_pairs: Vec<String>,
    pub timeframe: String,
}

impl Default for SmcStrategyConfig {
    fn default() -> Self {
        Self {
            enabled_pairs: vec!["BTC-USDT".into(), "ETH-USDT".into(), "SOL-USDT".into()],
            timeframe: "1h".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    pub webhook_url: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub enabled: bool,
    pub check_interval_seconds: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub enabled: bool,
    pub model_path: String,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_path: "models/".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyTradingConfig {
    pub enabled: bool,
    pub max_copied_traders: u32,
    pub auto_follow: bool,
    pub risk_multiplier: f64,
}

impl Default for CopyTradingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_copied_traders: 3,
            auto_follow: true,
            risk_multiplier: 1.0,
        }
    }
}
