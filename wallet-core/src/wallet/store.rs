// wallet-core/src/wallet/store.rs
//
// Persistence seam: CRUD interface cho wallet records.
// Database thật nằm ngoài crate; `InMemoryWalletStore` dùng cho tests / embedders.

use crate::error::{WalletError, WalletResult};
use crate::wallet::models::WalletRecord;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use zeroize::Zeroizing;

/// Wallet record storage.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Insert tất cả hoặc không insert gì
    async fn insert_many(&self, records: Vec<WalletRecord>) -> WalletResult<()>;

    async fn insert(&self, record: WalletRecord) -> WalletResult<()> {
        self.insert_many(vec![record]).await
    }

    /// Records của user theo thứ tự insert
    async fn list_for_user(&self, user_id: &str) -> WalletResult<Vec<WalletRecord>>;

    /// Seed phrase đã lưu của user (từ record non-mock đầu tiên)
    async fn seed_phrase_for_user(&self, user_id: &str) -> WalletResult<Option<Zeroizing<String>>> {
        Ok(self
            .list_for_user(user_id)
            .await?
            .into_iter()
            .filter(|record| !record.is_mock)
            .find_map(|record| record.seed_phrase))
    }
}

/// In-memory store, keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryWalletStore {
    wallets: RwLock<HashMap<String, Vec<WalletRecord>>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tổng số records
    pub fn len(&self) -> usize {
        self.wallets.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn insert_many(&self, records: Vec<WalletRecord>) -> WalletResult<()> {
        let mut wallets = self.wallets.write();

        // Validate cả batch trước khi ghi
        for (i, record) in records.iter().enumerate() {
            let same_wallet = |r: &WalletRecord| {
                r.id == record.id
                    || (r.user_id == record.user_id
                        && r.symbol == record.symbol
                        && r.address == record.address)
            };
            let clash_in_store = wallets
                .get(&record.user_id)
                .is_some_and(|existing| existing.iter().any(same_wallet));
            let clash_in_batch = records[..i].iter().any(same_wallet);

            if clash_in_store || clash_in_batch {
                return Err(WalletError::Storage(format!(
                    "duplicate {} wallet {} for user {}",
                    record.symbol, record.address, record.user_id
                )));
            }
        }

        for record in records {
            wallets.entry(record.user_id.clone()).or_default().push(record);
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> WalletResult<Vec<WalletRecord>> {
        Ok(self.wallets.read().get(user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::Network;

    fn mock_record(user: &str, symbol: &str, address: &str) -> WalletRecord {
        WalletRecord::mock(user, symbol, address.to_string(), symbol, Network::Mainnet, true)
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = InMemoryWalletStore::new();
        store.insert(mock_record("alice", "DOGE", "0x01")).await.unwrap();
        store.insert(mock_record("bob", "DOGE", "0x02")).await.unwrap();

        let alice = store.list_for_user("alice").await.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].address, "0x01");
        assert!(store.list_for_user("carol").await.unwrap().is_empty());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_many_is_all_or_nothing() {
        let store = InMemoryWalletStore::new();
        store.insert(mock_record("alice", "DOGE", "0x01")).await.unwrap();

        let batch = vec![
            mock_record("alice", "XRP", "0x02"),
            mock_record("alice", "DOGE", "0x01"), // duplicate
        ];
        assert!(matches!(
            store.insert_many(batch).await,
            Err(WalletError::Storage(_))
        ));
        assert_eq!(store.list_for_user("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_inside_batch_rejected() {
        let store = InMemoryWalletStore::new();
        let batch = vec![
            mock_record("alice", "XRP", "0x02"),
            mock_record("alice", "XRP", "0x02"),
        ];
        assert!(store.insert_many(batch).await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_seed_phrase_skips_mock_records() {
        let store = InMemoryWalletStore::new();
        store.insert(mock_record("alice", "DOGE", "0x01")).await.unwrap();
        assert!(store.seed_phrase_for_user("alice").await.unwrap().is_none());
    }
}
