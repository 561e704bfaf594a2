// wallet-core/src/wallet/provisioner.rs
//
// Provisioning flows:
// - Signup: tạo bộ BTC/ETH/USDT cho user mới (all-or-nothing)
// - Wallet route: thêm một wallet cho symbol bất kỳ, reuse seed phrase đã lưu

use crate::chains::Chain;
use crate::error::{WalletError, WalletResult};
use crate::wallet::generator::WalletGenerator;
use crate::wallet::models::{NewWallet, ProvisionOutcome, UserWallets, WalletOutcome, WalletRecord};
use crate::wallet::store::WalletStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{error, info};

pub struct WalletProvisioner<S: WalletStore> {
    generator: WalletGenerator,
    store: Arc<S>,
    user_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl<S: WalletStore> WalletProvisioner<S> {
    pub fn new(generator: WalletGenerator, store: Arc<S>) -> Self {
        Self {
            generator,
            store,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn generator(&self) -> &WalletGenerator {
        &self.generator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Signup flow.
    ///
    /// User account đã tồn tại ở phía caller; nếu generate hoặc persist lỗi thì
    /// trả về [`ProvisionOutcome::WalletsMissing`] (kèm `error!` log) thay vì
    /// làm fail signup. Không bao giờ lưu một bộ wallet thiếu.
    pub async fn provision_user(&self, user_id: &str) -> ProvisionOutcome {
        let wallets = match self.generator.generate_user_wallets_async().await {
            Ok(wallets) => wallets,
            Err(e) => return Self::wallets_missing(user_id, e),
        };

        let records = Self::default_records(user_id, &wallets);
        match self.store.insert_many(records.clone()).await {
            Ok(()) => {
                info!(
                    user_id,
                    btc = %wallets.btc.address,
                    eth = %wallets.eth.address,
                    "provisioned default wallets"
                );
                ProvisionOutcome::Provisioned(records)
            }
            Err(e) => Self::wallets_missing(user_id, e),
        }
    }

    fn default_records(user_id: &str, wallets: &UserWallets) -> Vec<WalletRecord> {
        wallets
            .iter()
            .map(|wallet| {
                let label = format!("{} Wallet", wallet.chain.name());
                WalletRecord::from_generated(user_id, wallet, label, true)
            })
            .collect()
    }

    fn user_lock(&self, user_id: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.user_locks.lock();
        Arc::clone(locks.entry(user_id.to_string()).or_default())
    }

    fn wallets_missing(user_id: &str, e: WalletError) -> ProvisionOutcome {
        error!(
            user_id,
            error = %e,
            "user has no wallets: default wallet provisioning failed"
        );
        ProvisionOutcome::WalletsMissing {
            reason: e.to_string(),
        }
    }

    /// Wallet route: tạo thêm một wallet cho `request.symbol`.
    ///
    /// - Reuse seed phrase đã lưu của user (nếu có), nếu không thì mnemonic mới
    /// - Address index = số wallet non-mock đã có của chain đó
    /// - `is_default` khi user chưa có wallet nào của symbol này
    /// - Symbol không hỗ trợ / derive lỗi → mock record
    ///
    /// Calls for the same user are serialized, so concurrent requests from a
    /// user without a stored phrase still end up on a single mnemonic.
    pub async fn create_wallet(&self, request: NewWallet) -> WalletResult<WalletRecord> {
        let user_lock = self.user_lock(&request.user_id);
        let _guard = user_lock.lock().await;

        let requested = request.symbol.trim().to_ascii_uppercase();
        let chain = requested.parse::<Chain>().ok();
        // aliases ("BITCOIN", "TETHER", ...) collapse onto the canonical symbol
        let symbol = chain.map_or(requested, |chain| chain.symbol().to_string());

        let existing = self.store.list_for_user(&request.user_id).await?;
        let phrase = self.store.seed_phrase_for_user(&request.user_id).await?;

        let is_default = !existing
            .iter()
            .any(|record| record.symbol.eq_ignore_ascii_case(&symbol));

        let address_index = match chain {
            Some(chain) => {
                let used = existing
                    .iter()
                    .filter(|record| !record.is_mock && record.chain() == Some(chain))
                    .count();
                u32::try_from(used).map_err(|_| {
                    WalletError::Storage(format!("too many {} wallets for one user", symbol))
                })?
            }
            None => 0,
        };

        let label = request
            .label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| format!("{} Wallet", symbol));

        let outcome = self.generator.wallet_for_symbol(
            &symbol,
            phrase.as_ref().map(|phrase| phrase.as_str()),
            address_index,
        );

        let record = match outcome {
            WalletOutcome::Derived(wallet) => {
                WalletRecord::from_generated(&request.user_id, &wallet, label, is_default)
            }
            WalletOutcome::Mock {
                symbol, address, ..
            } => WalletRecord::mock(
                &request.user_id,
                &symbol,
                address,
                label,
                self.generator.network(),
                is_default,
            ),
        };

        self.store.insert(record.clone()).await?;
        info!(
            user_id = %record.user_id,
            symbol = %record.symbol,
            is_mock = record.is_mock,
            is_default = record.is_default,
            "created wallet"
        );
        Ok(record)
    }
}

// =============================================================================
// TESTS
// =============================================================================
