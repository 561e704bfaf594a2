// wallet-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) Chain Support
//!
//! ETH and USDT (ERC-20) share one address space and one derivation path.
//!
//! # Key Features
//! - **Address Derivation**: EIP-55 checksummed address generation via [`EvmAddress`].
//! - **Encoding**: `0x`-prefixed hex private keys via [`EvmEncoder`].

pub mod address;

// Re-exports for cleaner API access
pub use address::{EvmAddress, EvmEncoder};
