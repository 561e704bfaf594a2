// wallet-core/src/chains/mod.rs

//! Per-chain address and private-key encoders.
//!
//! Mỗi chain nhận một [`DerivedKey`] từ `crypto::key_deriver` và trả về
//! [`ChainKeys`] đã encode theo định dạng của chain đó.

pub mod bitcoin;
pub mod evm;
pub mod mock;
pub mod solana;

pub use bitcoin::{BitcoinAddress, BitcoinEncoder};
pub use evm::{EvmAddress, EvmEncoder};
pub use mock::MockAddress;
pub use solana::{SolanaAddress, SolanaEncoder};

use crate::crypto::{CurveType, DerivationPath, DerivationPaths, DerivedKey};
use crate::error::{ChainError, WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

// =============================================================================
// CHAIN / NETWORK
// =============================================================================

/// Supported wallet symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Chain {
    Btc,
    Eth,
    /// ERC-20 USDT, cùng address space với ETH
    Usdt,
    Sol,
}

impl Chain {
    pub const ALL: [Chain; 4] = [Chain::Btc, Chain::Eth, Chain::Usdt, Chain::Sol];

    pub const fn symbol(self) -> &'static str {
        match self {
            Chain::Btc => "BTC",
            Chain::Eth => "ETH",
            Chain::Usdt => "USDT",
            Chain::Sol => "SOL",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Chain::Btc => "Bitcoin",
            Chain::Eth => "Ethereum",
            Chain::Usdt => "Tether USD (ERC-20)",
            Chain::Sol => "Solana",
        }
    }

    pub const fn curve(self) -> CurveType {
        match self {
            Chain::Sol => CurveType::Ed25519,
            _ => CurveType::Secp256k1,
        }
    }

    /// Derivation path cho wallet thứ `index` của chain này.
    ///
    /// BTC/ETH/USDT tăng address index (`.../0/{index}`); SOL tăng account
    /// (`m/44'/501'/{index}'/0'`) vì Ed25519 chỉ có hardened levels.
    pub fn derivation_path(self, network: Network, index: u32) -> DerivationPath {
        match (self, network) {
            (Chain::Btc, Network::Mainnet) => DerivationPaths::btc_legacy(0, index),
            (Chain::Btc, Network::Testnet) => DerivationPaths::btc_testnet_legacy(0, index),
            (Chain::Eth | Chain::Usdt, _) => DerivationPaths::evm(index),
            (Chain::Sol, _) => DerivationPaths::solana(index),
        }
    }

    /// Encoder tương ứng cho `network`
    pub fn encoder(self, network: Network) -> Box<dyn AddressEncoder> {
        match self {
            Chain::Btc => Box::new(BitcoinEncoder::new(network)),
            Chain::Eth | Chain::Usdt => Box::new(EvmEncoder::new(self)),
            Chain::Sol => Box::new(SolanaEncoder),
        }
    }

    pub fn is_valid_address(self, network: Network, address: &str) -> bool {
        self.encoder(network).is_valid_address(address)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Chain {
    type Err = WalletError;

    /// Case-insensitive: "btc", "Bitcoin", "USDT", "sol", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BTC" | "BITCOIN" => Ok(Chain::Btc),
            "ETH" | "ETHEREUM" => Ok(Chain::Eth),
            "USDT" | "TETHER" => Ok(Chain::Usdt),
            "SOL" | "SOLANA" => Ok(Chain::Sol),
            _ => Err(WalletError::UnsupportedChain(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(WalletError::Config(format!("unknown network '{}'", other))),
        }
    }
}

// =============================================================================
// ENCODER SEAM
// =============================================================================

/// Encoded wallet material for one chain.
#[derive(Clone)]
pub struct ChainKeys {
    pub address: String,
    /// WIF (BTC), `0x`-hex (EVM) hoặc Base58 keypair (SOL)
    pub private_key: Zeroizing<String>,
    /// Hex-encoded public key
    pub public_key: String,
}

impl fmt::Debug for ChainKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainKeys")
            .field("address", &self.address)
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Turns a derived key into a chain-specific address and private-key string.
pub trait AddressEncoder: Send + Sync {
    fn chain(&self) -> Chain;

    fn curve(&self) -> CurveType {
        self.chain().curve()
    }

    fn encode(&self, key: &DerivedKey) -> WalletResult<ChainKeys>;

    fn is_valid_address(&self, address: &str) -> bool;

    fn ensure_curve(&self, key: &DerivedKey) -> WalletResult<()> {
        if key.curve != self.curve() {
            return Err(ChainError::CurveMismatch {
                chain: self.chain(),
                expected: self.curve(),
                actual: key.curve,
            }
            .into());
        }
        Ok(())
    }
}
