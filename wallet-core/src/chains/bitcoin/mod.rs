// wallet-core/src/chains/bitcoin/mod.rs

//! Bitcoin Chain Support
//!
//! Legacy P2PKH addresses (`1...` mainnet, `m...`/`n...` testnet) and
//! compressed WIF private keys via [`BitcoinAddress`] / [`BitcoinEncoder`].

pub mod address;

pub use address::{BitcoinAddress, BitcoinEncoder, WifKey};
