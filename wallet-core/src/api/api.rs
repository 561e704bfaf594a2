// wallet-core/src/api/api.rs
//
// Public facade: owned arguments, serializable results.

use crate::chains::{Chain, Network};
use crate::config::WalletConfig;
use crate::crypto::{CurveType, WalletMnemonic, WordCount};
use crate::error::WalletResult;
use crate::telemetry;
use crate::wallet::{GeneratedWallet, UserWallets, WalletGenerator};
use serde::Serialize;
use tracing::info;
use zeroize::Zeroizing;

/// Mô tả một chain được hỗ trợ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub symbol: String,
    pub name: String,
    pub curve: CurveType,
    /// Path của wallet đầu tiên trên mainnet
    pub derivation_path: String,
    /// Chain có address riêng (USDT dùng chung với ETH)
    pub shares_address_with: Option<String>,
}

// --- Core Initialization ---

pub fn init_core(config: &WalletConfig) -> WalletResult<()> {
    let installed = telemetry::init_tracing(&config.log)?;
    info!(
        network = %config.network,
        word_count = usize::from(config.word_count),
        subscriber_installed = installed,
        "wallet core initialised"
    );
    Ok(())
}

// --- Key Management ---

/// Bộ BTC/ETH/USDT mới cho một user
pub async fn create_user_wallets(config: &WalletConfig) -> WalletResult<UserWallets> {
    WalletGenerator::new(config.generator_config())
        .generate_user_wallets_async()
        .await
}

pub fn restore_wallet(
    config: &WalletConfig,
    symbol: String,
    mnemonic: String,
) -> WalletResult<GeneratedWallet> {
    let mnemonic = Zeroizing::new(mnemonic);
    let chain: Chain = symbol.parse()?;
    WalletGenerator::new(config.generator_config()).restore_wallet(chain, &mnemonic)
}

pub fn generate_mnemonic(word_count: usize) -> WalletResult<Zeroizing<String>> {
    let mnemonic = WalletMnemonic::generate(WordCount::from_words(word_count)?)?;
    Ok(Zeroizing::new(mnemonic.phrase().to_string()))
}

pub fn validate_mnemonic(mnemonic: String) -> bool {
    let mnemonic = Zeroizing::new(mnemonic);
    WalletMnemonic::validate(&mnemonic)
}

/// Unsupported symbol → `WalletError::UnsupportedChain`
pub fn validate_address(symbol: String, network: Network, address: String) -> WalletResult<bool> {
    let chain: Chain = symbol.parse()?;
    Ok(chain.is_valid_address(network, &address))
}

// --- Config Helpers ---

pub fn supported_chains() -> Vec<ChainInfo> {
    Chain::ALL
        .into_iter()
        .map(|chain| ChainInfo {
            symbol: chain.symbol().to_string(),
            name: chain.name().to_string(),
            curve: chain.curve(),
            derivation_path: chain.derivation_path(Network::Mainnet, 0).to_string(),
            shares_address_with: (chain == Chain::Usdt).then(|| Chain::Eth.symbol().to_string()),
        })
        .collect()
}
