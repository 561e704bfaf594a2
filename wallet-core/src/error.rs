// wallet-core/src/error.rs

use crate::chains::Chain;
use crate::crypto::CurveType;
use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Chain Error: {0}")]
    Chain(#[from] ChainError),

    #[error("Unsupported chain symbol: {0}")]
    UnsupportedChain(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Storage Error: {0}")]
    Storage(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl WalletError {
    /// True khi lỗi đến từ một mnemonic không hợp lệ (sai số từ, từ lạ, sai checksum).
    pub fn is_invalid_mnemonic(&self) -> bool {
        matches!(
            self,
            WalletError::Mnemonic(
                MnemonicError::InvalidWordCount(_)
                    | MnemonicError::UnknownWord(_)
                    | MnemonicError::ChecksumFailed
                    | MnemonicError::Bip39Error(_)
            )
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Secure randomness unavailable: {0}")]
    Entropy(String),

    #[error("Invalid strength: {0} bits. Expected 128, 160, 192, 224 or 256.")]
    InvalidStrength(usize),

    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Derived child key at index {index:#010x} is invalid")]
    InvalidChild { index: u32 },

    #[error("Hardened index {0:#010x} cannot be derived from a public-only key")]
    HardenedFromPublic(u32),

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("{chain} derivation failed: {reason}")]
    Derivation { chain: Chain, reason: String },

    #[error("{chain} expects a {expected:?} key, got {actual:?}")]
    CurveMismatch {
        chain: Chain,
        expected: CurveType,
        actual: CurveType,
    },

    #[error("Invalid {chain} address: {address}")]
    InvalidAddress { chain: Chain, address: String },
}

impl ChainError {
    pub(crate) fn derivation(chain: Chain, reason: impl Into<String>) -> Self {
        ChainError::Derivation {
            chain,
            reason: reason.into(),
        }
    }
}
