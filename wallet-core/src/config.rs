// wallet-core/src/config.rs

//! Wallet core configuration
//!
//! Loaded from a TOML file, then overridden by environment variables.
//!
//! # Example wallet.toml
//!
//! ```toml
//! # mainnet | testnet
//! network = "mainnet"
//!
//! # 12 | 15 | 18 | 21 | 24
//! word_count = 12
//!
//! # BIP-39 passphrase, empty by default
//! passphrase = ""
//!
//! # next_index | fail
//! invalid_child_policy = "next_index"
//!
//! [log]
//! level = "info"
//! # text | json
//! format = "text"
//! ```

use crate::chains::Network;
use crate::crypto::{InvalidChildPolicy, WordCount};
use crate::error::{WalletError, WalletResult};
use crate::wallet::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use zeroize::Zeroizing;

pub const ENV_NETWORK: &str = "WALLET_NETWORK";
pub const ENV_WORD_COUNT: &str = "WALLET_WORD_COUNT";
pub const ENV_LOG_LEVEL: &str = "WALLET_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter khi `RUST_LOG` không được set
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub network: Network,
    pub word_count: WordCount,
    pub passphrase: String,
    pub invalid_child_policy: InvalidChildPolicy,
    pub log: LogConfig,
}

// Custom Debug - không in passphrase
impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("network", &self.network)
            .field("word_count", &self.word_count)
            .field("has_passphrase", &!self.passphrase.is_empty())
            .field("invalid_child_policy", &self.invalid_child_policy)
            .field("log", &self.log)
            .finish()
    }
}

impl WalletConfig {
    pub fn from_toml_str(content: &str) -> WalletResult<Self> {
        toml::from_str(content)
            .map_err(|e| WalletError::Config(format!("Failed to parse wallet config: {}", e)))
    }

    /// Đọc file TOML rồi áp env overrides
    pub fn load(path: impl AsRef<Path>) -> WalletResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            WalletError::Config(format!(
                "Failed to read wallet config {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// `WALLET_NETWORK`, `WALLET_WORD_COUNT`, `WALLET_LOG_LEVEL`
    pub fn apply_env_overrides(&mut self) -> WalletResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override từ một nguồn key → value bất kỳ (env, tests)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> WalletResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(network) = lookup(ENV_NETWORK) {
            self.network = network.parse()?;
        }

        if let Some(word_count) = lookup(ENV_WORD_COUNT) {
            let count: usize = word_count.trim().parse().map_err(|_| {
                WalletError::Config(format!(
                    "{} must be a number, got '{}'",
                    ENV_WORD_COUNT, word_count
                ))
            })?;
            self.word_count = WordCount::from_words(count)
                .map_err(|e| WalletError::Config(format!("{}: {}", ENV_WORD_COUNT, e)))?;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log.level = level;
        }

        Ok(())
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::from(self)
    }
}

impl From<&WalletConfig> for GeneratorConfig {
    fn from(config: &WalletConfig) -> Self {
        Self {
            network: config.network,
            word_count: config.word_count,
            passphrase: Zeroizing::new(config.passphrase.clone()),
            invalid_child_policy: config.invalid_child_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = WalletConfig::default();
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.word_count, WordCount::Twelve);
        assert_eq!(config.passphrase, "");
        assert_eq!(config.invalid_child_policy, InvalidChildPolicy::NextIndex);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(WalletConfig::from_toml_str("").unwrap(), WalletConfig::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let config = WalletConfig::from_toml_str(
            r#"
            network = "testnet"
            word_count = 24
            passphrase = "extra"
            invalid_child_policy = "fail"

            [log]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.word_count, WordCount::TwentyFour);
        assert_eq!(config.passphrase, "extra");
        assert_eq!(config.invalid_child_policy, InvalidChildPolicy::Fail);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_word_count_rejected() {
        let err = WalletConfig::from_toml_str("word_count = 13").unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_NETWORK, "testnet"),
            (ENV_WORD_COUNT, "18"),
            (ENV_LOG_LEVEL, "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = WalletConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.word_count, WordCount::Eighteen);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_bad_overrides() {
        let mut config = WalletConfig::default();
        assert!(config
            .apply_overrides(|key| (key == ENV_WORD_COUNT).then(|| "abc".to_string()))
            .is_err());
        assert!(config
            .apply_overrides(|key| (key == ENV_WORD_COUNT).then(|| "13".to_string()))
            .is_err());
        assert!(config
            .apply_overrides(|key| (key == ENV_NETWORK).then(|| "regtest".to_string()))
            .is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = WalletConfig::load("/definitely/not/here/wallet.toml").unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn test_generator_config() {
        let config = WalletConfig {
            network: Network::Testnet,
            passphrase: "pw".to_string(),
            ..WalletConfig::default()
        };
        let generator = config.generator_config();
        assert_eq!(generator.network, Network::Testnet);
        assert_eq!(generator.passphrase.as_str(), "pw");
    }

    #[test]
    fn test_debug_hides_passphrase() {
        let config = WalletConfig {
            passphrase: "hunter2".to_string(),
            ..WalletConfig::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
