// wallet-core/src/wallet/mod.rs

//! Wallet orchestration
//!
//! - [`WalletGenerator`]: mnemonic → seed → key → address cho từng chain
//! - [`WalletStore`]: persistence seam (CRUD), [`InMemoryWalletStore`] cho tests
//! - [`WalletProvisioner`]: signup flow + wallet-creation route

pub mod generator;
pub mod models;
pub mod provisioner;
pub mod store;

pub use generator::{GeneratorConfig, WalletGenerator};
pub use models::{
    GeneratedWallet, NewWallet, ProvisionOutcome, UserWallets, WalletOutcome, WalletRecord,
};
pub use provisioner::WalletProvisioner;
pub use store::{InMemoryWalletStore, WalletStore};
