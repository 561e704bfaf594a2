// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! This module implements the key-derivation core of the custodial wallet:
//!
//! - **Mnemonic Generation**: BIP-39 phrases (12–24 words) via [`WalletMnemonic`].
//! - **Seed Derivation**: PBKDF2-HMAC-SHA512 stretching into a 64-byte [`Seed`].
//! - **Key Derivation**: BIP-32 tree for secp256k1 ([`ExtendedKey`]) and SLIP-0010 for Ed25519, behind [`KeyDeriver`].
//! - **Derivation Paths**: [`DerivationPath`] model plus pre-built BIP-44 paths in [`DerivationPaths`].

pub mod hash;
pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod seed;

// Re-exports for cleaner API access
pub use key_deriver::{CurveType, DerivedKey, ExtendedKey, InvalidChildPolicy, KeyDeriver};
pub use mnemonic::{WalletMnemonic, WordCount};
pub use paths::{ChildIndex, DerivationPath, DerivationPaths};
pub use seed::{mnemonic_to_seed, Seed};
