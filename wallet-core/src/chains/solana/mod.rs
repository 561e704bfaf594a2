// wallet-core/src/chains/solana/mod.rs

//! Solana Chain Support
//!
//! Address = Base58(Ed25519 public key); private key = Base58(secret ‖ public),
//! the 64-byte keypair format wallets such as Phantom import.

pub mod address;

pub use address::{SolanaAddress, SolanaEncoder};
