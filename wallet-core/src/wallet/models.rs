// wallet-core/src/wallet/models.rs
//
// Wallet Data Models
//
// - GeneratedWallet: output của orchestrator, map 1-1 vào record `{address, privateKey, seedPhrase}`
// - WalletRecord: bản ghi được persistence layer lưu
// - Secrets (private key, seed phrase) luôn là `Zeroizing<String>`

use crate::chains::{Chain, Network};
use crate::crypto::WalletMnemonic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use zeroize::Zeroizing;

// =============================================================================
// GENERATED WALLET
// =============================================================================

/// One derived wallet: address, encoded private key, and the phrase it came from.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWallet {
    pub chain: Chain,
    pub network: Network,
    pub address: String,
    pub private_key: Zeroizing<String>,
    pub public_key: String,
    pub seed_phrase: Zeroizing<String>,
    /// Path thực sự đã dùng, e.g. `m/44'/0'/0'/0/0`
    pub derivation_path: String,
}

impl GeneratedWallet {
    /// Same key material under another symbol (USDT reuses the ETH derivation).
    pub fn relabel(&self, chain: Chain) -> Self {
        Self {
            chain,
            ..self.clone()
        }
    }
}

impl fmt::Debug for GeneratedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedWallet")
            .field("chain", &self.chain)
            .field("network", &self.network)
            .field("address", &self.address)
            .field("private_key", &"[REDACTED]")
            .field("seed_phrase", &"[REDACTED]")
            .field("derivation_path", &self.derivation_path)
            .finish()
    }
}

/// Bộ wallet mặc định cho user mới: một mnemonic, ba chain.
#[derive(Debug, Clone)]
pub struct UserWallets {
    pub mnemonic: WalletMnemonic,
    pub btc: GeneratedWallet,
    pub eth: GeneratedWallet,
    pub usdt: GeneratedWallet,
}

impl UserWallets {
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedWallet> {
        [&self.btc, &self.eth, &self.usdt].into_iter()
    }
}

// =============================================================================
// PERSISTED RECORD
// =============================================================================

/// Wallet row as the persistence layer stores it.
///
/// Mock records never carry key material.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub id: Uuid,
    pub user_id: String,
    pub symbol: String,
    pub address: String,
    pub private_key: Option<Zeroizing<String>>,
    pub seed_phrase: Option<Zeroizing<String>>,
    pub label: String,
    pub network: Network,
    pub is_default: bool,
    pub is_mock: bool,
    pub derivation_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WalletRecord {
    pub fn from_generated(
        user_id: &str,
        wallet: &GeneratedWallet,
        label: impl Into<String>,
        is_default: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            symbol: wallet.chain.symbol().to_string(),
            address: wallet.address.clone(),
            private_key: Some(wallet.private_key.clone()),
            seed_phrase: Some(wallet.seed_phrase.clone()),
            label: label.into(),
            network: wallet.network,
            is_default,
            is_mock: false,
            derivation_path: Some(wallet.derivation_path.clone()),
            created_at: Utc::now(),
        }
    }

    pub fn mock(
        user_id: &str,
        symbol: &str,
        address: String,
        label: impl Into<String>,
        network: Network,
        is_default: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            symbol: symbol.to_string(),
            address,
            private_key: None,
            seed_phrase: None,
            label: label.into(),
            network,
            is_default,
            is_mock: true,
            derivation_path: None,
            created_at: Utc::now(),
        }
    }

    /// `None` cho symbol không được hỗ trợ (chỉ có ở mock record)
    pub fn chain(&self) -> Option<Chain> {
        self.symbol.parse().ok()
    }
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("symbol", &self.symbol)
            .field("address", &self.address)
            .field("has_private_key", &self.private_key.is_some())
            .field("label", &self.label)
            .field("network", &self.network)
            .field("is_default", &self.is_default)
            .field("is_mock", &self.is_mock)
            .field("derivation_path", &self.derivation_path)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Request của wallet-creation route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    pub user_id: String,
    pub symbol: String,
    #[serde(default)]
    pub label: Option<String>,
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Kết quả tạo wallet cho một symbol: derive thật, hoặc mock placeholder.
#[derive(Debug, Clone)]
pub enum WalletOutcome {
    Derived(GeneratedWallet),
    Mock {
        symbol: String,
        address: String,
        reason: String,
    },
}

impl WalletOutcome {
    pub fn address(&self) -> &str {
        match self {
            WalletOutcome::Derived(wallet) => &wallet.address,
            WalletOutcome::Mock { address, .. } => address,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, WalletOutcome::Mock { .. })
    }
}

/// Kết quả signup provisioning.
#[derive(Debug, Clone)]
pub enum ProvisionOutcome {
    Provisioned(Vec<WalletRecord>),
    /// User tồn tại nhưng không có wallet; caller phải hiển thị / alert
    WalletsMissing { reason: String },
}

impl ProvisionOutcome {
    pub fn is_provisioned(&self) -> bool {
        matches!(self, ProvisionOutcome::Provisioned(_))
    }

    pub fn records(&self) -> &[WalletRecord] {
        match self {
            ProvisionOutcome::Provisioned(records) => records,
            ProvisionOutcome::WalletsMissing { .. } => &[],
        }
    }
}
