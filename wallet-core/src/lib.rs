// wallet-core/src/lib.rs

//! Custodial wallet key-derivation core.
//!
//! BIP-39 mnemonics, BIP-32/44 secp256k1 trees and SLIP-0010 Ed25519 keys,
//! encoded as BTC (P2PKH + WIF), ETH / USDT (EIP-55) and SOL (Base58) wallets.
//!
//! ```no_run
//! use custody_wallet_core::wallet::WalletGenerator;
//!
//! let generator = WalletGenerator::default();
//! let wallets = generator.generate_user_wallets()?;
//! let restored = generator.restore_btc_wallet(wallets.mnemonic.phrase())?;
//! assert_eq!(restored.address, wallets.btc.address);
//! # Ok::<(), custody_wallet_core::WalletError>(())
//! ```

pub mod api;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod telemetry;
pub mod wallet;

pub use chains::{Chain, Network};
pub use config::WalletConfig;
pub use error::{WalletError, WalletResult};
