// wallet-core/src/wallet/generator.rs
//
// Wallet Orchestrator
//
// Flow:
//   Mnemonic (BIP-39) → Seed (PBKDF2) → KeyDeriver (BIP-32 / SLIP-0010)
//     → AddressEncoder (P2PKH / EIP-55 / Base58) → GeneratedWallet
//
// Mọi bước derive là sync + pure; async chỉ ở `generate_user_wallets_async`.

use crate::chains::{Chain, MockAddress, Network};
use crate::crypto::{DerivationPath, InvalidChildPolicy, KeyDeriver, WalletMnemonic, WordCount};
use crate::error::{WalletError, WalletResult};
use crate::wallet::models::{GeneratedWallet, UserWallets, WalletOutcome};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Generator settings, usually built from [`crate::config::WalletConfig`].
#[derive(Clone, Default)]
pub struct GeneratorConfig {
    pub network: Network,
    pub word_count: WordCount,
    /// BIP-39 passphrase ("25th word"), mặc định rỗng
    pub passphrase: Zeroizing<String>,
    pub invalid_child_policy: InvalidChildPolicy,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("network", &self.network)
            .field("word_count", &self.word_count)
            .field("has_passphrase", &!self.passphrase.is_empty())
            .field("invalid_child_policy", &self.invalid_child_policy)
            .finish()
    }
}

/// Multi-chain wallet generator.
///
/// # Security
/// - Seed chỉ tồn tại trong scope của một lần derive (zeroize khi drop)
/// - Không log private key / seed phrase
#[derive(Debug, Clone, Default)]
pub struct WalletGenerator {
    config: GeneratorConfig,
}

impl WalletGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[inline]
    pub fn network(&self) -> Network {
        self.config.network
    }

    // =========================================================================
    // CORE
    // =========================================================================

    /// Mnemonic mới với word count theo config
    pub fn generate_mnemonic(&self) -> WalletResult<WalletMnemonic> {
        WalletMnemonic::generate(self.config.word_count)
    }

    /// Derive wallet thứ `address_index` của `chain` từ mnemonic.
    pub fn derive_wallet(
        &self,
        chain: Chain,
        mnemonic: &WalletMnemonic,
        address_index: u32,
    ) -> WalletResult<GeneratedWallet> {
        let path = chain.derivation_path(self.config.network, address_index);
        self.derive_wallet_at_path(chain, mnemonic, &path)
    }

    /// Derive theo path cụ thể (e.g. path đã lưu trong wallet record).
    pub fn derive_wallet_at_path(
        &self,
        chain: Chain,
        mnemonic: &WalletMnemonic,
        path: &DerivationPath,
    ) -> WalletResult<GeneratedWallet> {
        let seed = mnemonic.to_seed(&self.config.passphrase)?;
        let key = KeyDeriver::derive(
            seed.as_bytes(),
            path,
            chain.curve(),
            self.config.invalid_child_policy,
        )?;
        let keys = chain.encoder(self.config.network).encode(&key)?;

        debug!(
            chain = %chain,
            network = %self.config.network,
            path = %key.path,
            address = %keys.address,
            "derived wallet"
        );

        Ok(GeneratedWallet {
            chain,
            network: self.config.network,
            address: keys.address,
            private_key: keys.private_key,
            public_key: keys.public_key,
            seed_phrase: Zeroizing::new(mnemonic.phrase().to_string()),
            derivation_path: key.path.to_string(),
        })
    }

    /// Fresh mnemonic, address index 0
    pub fn generate_wallet(&self, chain: Chain) -> WalletResult<GeneratedWallet> {
        let mnemonic = self.generate_mnemonic()?;
        self.derive_wallet(chain, &mnemonic, 0)
    }

    /// Restore wallet index 0 từ phrase; cùng phrase + passphrase → cùng output
    pub fn restore_wallet(&self, chain: Chain, phrase: &str) -> WalletResult<GeneratedWallet> {
        let mnemonic = WalletMnemonic::from_phrase(phrase)?;
        self.derive_wallet(chain, &mnemonic, 0)
    }

    /// Restore theo derivation path đã lưu, e.g. `"m/44'/60'/0'/0/3"`
    pub fn restore_wallet_at_path(
        &self,
        chain: Chain,
        phrase: &str,
        path: &str,
    ) -> WalletResult<GeneratedWallet> {
        let mnemonic = WalletMnemonic::from_phrase(phrase)?;
        let path: DerivationPath = path.parse()?;
        self.derive_wallet_at_path(chain, &mnemonic, &path)
    }

    // =========================================================================
    // PER-CHAIN SHORTCUTS
    // =========================================================================

    pub fn generate_btc_wallet(&self) -> WalletResult<GeneratedWallet> {
        self.generate_wallet(Chain::Btc)
    }

    pub fn restore_btc_wallet(&self, phrase: &str) -> WalletResult<GeneratedWallet> {
        self.restore_wallet(Chain::Btc, phrase)
    }

    pub fn generate_eth_wallet(&self) -> WalletResult<GeneratedWallet> {
        self.generate_wallet(Chain::Eth)
    }

    pub fn restore_eth_wallet(&self, phrase: &str) -> WalletResult<GeneratedWallet> {
        self.restore_wallet(Chain::Eth, phrase)
    }

    pub fn generate_usdt_wallet(&self) -> WalletResult<GeneratedWallet> {
        self.generate_wallet(Chain::Usdt)
    }

    pub fn restore_usdt_wallet(&self, phrase: &str) -> WalletResult<GeneratedWallet> {
        self.restore_wallet(Chain::Usdt, phrase)
    }

    pub fn generate_sol_wallet(&self) -> WalletResult<GeneratedWallet> {
        self.generate_wallet(Chain::Sol)
    }

    pub fn restore_sol_wallet(&self, phrase: &str) -> WalletResult<GeneratedWallet> {
        self.restore_wallet(Chain::Sol, phrase)
    }

    // =========================================================================
    // USER WALLET SET
    // =========================================================================

    /// Một mnemonic, ba wallet (BTC, ETH, USDT). Lỗi ở bất kỳ chain nào → lỗi cả bộ.
    pub fn generate_user_wallets(&self) -> WalletResult<UserWallets> {
        let mnemonic = self.generate_mnemonic()?;
        let btc = self.derive_wallet(Chain::Btc, &mnemonic, 0)?;
        let eth = self.derive_wallet(Chain::Eth, &mnemonic, 0)?;
        let usdt = eth.relabel(Chain::Usdt);

        Ok(UserWallets {
            mnemonic,
            btc,
            eth,
            usdt,
        })
    }

    /// Như [`generate_user_wallets`](Self::generate_user_wallets), nhưng chạy
    /// trên blocking pool: BTC và ETH derive song song.
    pub async fn generate_user_wallets_async(&self) -> WalletResult<UserWallets> {
        let generator = self.clone();
        let mnemonic = join_blocking(tokio::task::spawn_blocking(move || {
            generator.generate_mnemonic()
        }))
        .await?;

        let btc_task = {
            let generator = self.clone();
            let mnemonic = mnemonic.clone();
            tokio::task::spawn_blocking(move || generator.derive_wallet(Chain::Btc, &mnemonic, 0))
        };
        let eth_task = {
            let generator = self.clone();
            let mnemonic = mnemonic.clone();
            tokio::task::spawn_blocking(move || generator.derive_wallet(Chain::Eth, &mnemonic, 0))
        };

        let (btc, eth) = tokio::try_join!(join_blocking(btc_task), join_blocking(eth_task))?;
        let usdt = eth.relabel(Chain::Usdt);

        Ok(UserWallets {
            mnemonic,
            btc,
            eth,
            usdt,
        })
    }

    // =========================================================================
    // WALLET ROUTE POLICY
    // =========================================================================

    /// Wallet cho một symbol bất kỳ: derive thật nếu được, nếu không thì mock.
    ///
    /// `existing_phrase` = phrase đã lưu của user (reuse), `None` → mnemonic mới.
    pub fn wallet_for_symbol(
        &self,
        symbol: &str,
        existing_phrase: Option<&str>,
        address_index: u32,
    ) -> WalletOutcome {
        let chain = match symbol.parse::<Chain>() {
            Ok(chain) => chain,
            Err(e) => return Self::mock_outcome(symbol, e),
        };

        let derived = match existing_phrase {
            Some(phrase) => WalletMnemonic::from_phrase(phrase)
                .and_then(|mnemonic| self.derive_wallet(chain, &mnemonic, address_index)),
            None => self
                .generate_mnemonic()
                .and_then(|mnemonic| self.derive_wallet(chain, &mnemonic, address_index)),
        };

        match derived {
            Ok(wallet) => WalletOutcome::Derived(wallet),
            Err(e) => Self::mock_outcome(symbol, e),
        }
    }

    fn mock_outcome(symbol: &str, error: WalletError) -> WalletOutcome {
        let address = MockAddress::generate();
        warn!(
            symbol,
            address = %address,
            error = %error,
            "falling back to mock address"
        );
        WalletOutcome::Mock {
            symbol: symbol.trim().to_ascii_uppercase(),
            address,
            reason: error.to_string(),
        }
    }
}

async fn join_blocking<T>(handle: JoinHandle<WalletResult<T>>) -> WalletResult<T> {
    match handle.await {
        Ok(result) => result,
        Err(e) => Err(WalletError::Task(e.to_string())),
    }
}

// =============================================================================
// TESTS
// =============================================================================
