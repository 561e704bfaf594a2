// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - BIP-44 path model & pre-built paths
// BIP-32 (path notation), BIP-44 (Purpose), SLIP-44 (Coin Types), SLIP-0010 (ed25519)

use crate::error::{CryptoError, WalletError, WalletResult};
use std::fmt;
use std::str::FromStr;

pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
    /// Mọi testnet dùng chung coin_type 1
    pub const TESTNET: u32 = 1;
    pub const ETHEREUM: u32 = 60;
    pub const SOLANA: u32 = 501;
}

// =============================================================================
// PATH MODEL
// =============================================================================

/// One step of a derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildIndex {
    index: u32,
    hardened: bool,
}

impl ChildIndex {
    pub fn new(index: u32, hardened: bool) -> WalletResult<Self> {
        if index >= HARDENED_OFFSET {
            return Err(CryptoError::InvalidPath(format!(
                "index {} out of range (must be < 2^31)",
                index
            ))
            .into());
        }
        Ok(Self { index, hardened })
    }

    #[inline]
    pub const fn normal(index: u32) -> Self {
        Self {
            index: index & !HARDENED_OFFSET,
            hardened: false,
        }
    }

    #[inline]
    pub const fn hardened(index: u32) -> Self {
        Self {
            index: index & !HARDENED_OFFSET,
            hardened: true,
        }
    }

    /// Decode the BIP-32 `ser32` form (hardened bit = 2^31).
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            index: raw & !HARDENED_OFFSET,
            hardened: raw & HARDENED_OFFSET != 0,
        }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn is_hardened(self) -> bool {
        self.hardened
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }

    /// Same hardening, index + 1. Used when a child key is invalid (BIP-32).
    pub fn next(self) -> WalletResult<Self> {
        let index = self.index + 1;
        if index >= HARDENED_OFFSET {
            return Err(CryptoError::InvalidPath("child index space exhausted".to_string()).into());
        }
        Ok(Self { index, ..self })
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildIndex {
    type Err = WalletError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        let hardened = segment.ends_with('\'') || segment.ends_with('h') || segment.ends_with('H');
        let digits = if hardened {
            &segment[..segment.len() - 1]
        } else {
            segment
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CryptoError::InvalidPath(format!("invalid segment '{}'", segment)).into());
        }

        let index: u32 = digits.parse().map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidPath(format!(
                "invalid index '{}': {}",
                digits, e
            )))
        })?;

        Self::new(index, hardened)
    }
}

/// Ordered list of derivation steps, e.g. `m/44'/0'/0'/0/0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    /// Path `m` (master key).
    pub fn master() -> Self {
        Self(Vec::new())
    }

    pub fn from_steps(steps: Vec<ChildIndex>) -> Self {
        Self(steps)
    }

    /// BIP-44: `m/purpose'/coin'/account'/change/index`
    pub fn bip44(purpose: u32, coin_type: u32, account: u32, change: u32, index: u32) -> Self {
        Self(vec![
            ChildIndex::hardened(purpose),
            ChildIndex::hardened(coin_type),
            ChildIndex::hardened(account),
            ChildIndex::normal(change),
            ChildIndex::normal(index),
        ])
    }

    /// SLIP-0010 ed25519: `m/44'/coin'/account'/sub...'`, mọi level đều hardened
    pub fn ed25519(coin_type: u32, account: u32, sub_paths: &[u32]) -> Self {
        let mut steps = vec![
            ChildIndex::hardened(44),
            ChildIndex::hardened(coin_type),
            ChildIndex::hardened(account),
        ];
        steps.extend(sub_paths.iter().map(|&i| ChildIndex::hardened(i)));
        Self(steps)
    }

    pub fn child(&self, step: ChildIndex) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }

    #[inline]
    pub fn steps(&self) -> &[ChildIndex] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_fully_hardened(&self) -> bool {
        self.0.iter().all(|c| c.is_hardened())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChildIndex> {
        self.0.iter()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for step in &self.0 {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    /// Parse `m/44'/0'/0'/0/0`. `'`, `h` và `H` đều là hardened.
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim();
        let mut segments = path.split('/');

        if segments.next() != Some("m") {
            return Err(CryptoError::InvalidPath(format!("path must start with 'm': {}", path)).into());
        }

        let steps = segments
            .map(|segment| {
                if segment.is_empty() {
                    Err(CryptoError::InvalidPath(format!("empty segment in '{}'", path)).into())
                } else {
                    segment.parse::<ChildIndex>()
                }
            })
            .collect::<WalletResult<Vec<_>>>()?;

        Ok(Self(steps))
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildIndex;
    type IntoIter = std::slice::Iter<'a, ChildIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// PRE-BUILT PATHS
// =============================================================================
/// Pre-built Derivation Paths cho các chain được hỗ trợ
///
/// # Conventions
/// - BIP-44: `m/44'/coin'/account'/change/index` (secp256k1)
/// - SLIP-0010: `m/44'/501'/account'/0'` (ed25519, all hardened, Phantom layout)
pub struct DerivationPaths;

impl DerivationPaths {
    // =========================================================================
    // BITCOIN (secp256k1): BIP-44 Legacy P2PKH (1...)
    // =========================================================================
    pub const BTC_LEGACY_0: &'static str = "m/44'/0'/0'/0/0";
    pub const BTC_TESTNET_LEGACY_0: &'static str = "m/44'/1'/0'/0/0";

    #[inline]
    pub fn btc_legacy(account: u32, index: u32) -> DerivationPath {
        DerivationPath::bip44(44, coin_type::BITCOIN, account, 0, index)
    }

    #[inline]
    pub fn btc_testnet_legacy(account: u32, index: u32) -> DerivationPath {
        DerivationPath::bip44(44, coin_type::TESTNET, account, 0, index)
    }

    // =========================================================================
    // EVM CHAINS (secp256k1): BIP-44, coin_type = 60
    // ETH và USDT (ERC-20) dùng chung path
    // =========================================================================
    pub const EVM_0: &'static str = "m/44'/60'/0'/0/0";

    #[inline]
    pub fn evm(index: u32) -> DerivationPath {
        DerivationPath::bip44(44, coin_type::ETHEREUM, 0, 0, index)
    }

    // =========================================================================
    // SOLANA (ed25519): SLIP-0010 (all levels hardened)
    // =========================================================================
    pub const SOLANA_0: &'static str = "m/44'/501'/0'/0'";

    #[inline]
    pub fn solana(account: u32) -> DerivationPath {
        DerivationPath::ed25519(coin_type::SOLANA, account, &[0])
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitcoin_paths() {
        assert_eq!(DerivationPaths::btc_legacy(0, 0).to_string(), DerivationPaths::BTC_LEGACY_0);
        assert_eq!(DerivationPaths::btc_legacy(1, 7).to_string(), "m/44'/0'/1'/0/7");
        assert_eq!(
            DerivationPaths::btc_testnet_legacy(0, 0).to_string(),
            DerivationPaths::BTC_TESTNET_LEGACY_0
        );
    }

    #[test]
    fn test_evm_paths() {
        assert_eq!(DerivationPaths::evm(0).to_string(), DerivationPaths::EVM_0);
        assert_eq!(DerivationPaths::evm(5).to_string(), "m/44'/60'/0'/0/5");
    }

    #[test]
    fn test_solana_paths() {
        assert_eq!(DerivationPaths::solana(0).to_string(), DerivationPaths::SOLANA_0);
        assert_eq!(DerivationPaths::solana(2).to_string(), "m/44'/501'/2'/0'");
        assert!(DerivationPaths::solana(0).is_fully_hardened());
        assert!(!DerivationPaths::evm(0).is_fully_hardened());
    }

    #[test]
    fn test_parse_roundtrip_constants() {
        for path in [
            DerivationPaths::BTC_LEGACY_0,
            DerivationPaths::BTC_TESTNET_LEGACY_0,
            DerivationPaths::EVM_0,
            DerivationPaths::SOLANA_0,
        ] {
            let parsed: DerivationPath = path.parse().unwrap();
            assert_eq!(parsed.to_string(), path);
        }
    }

    #[test]
    fn test_parse_alternative_hardened_markers() {
        let a: DerivationPath = "m/44h/60H/0'/0/1".parse().unwrap();
        assert_eq!(a, DerivationPaths::evm(1));
    }

    #[test]
    fn test_parse_master() {
        let m: DerivationPath = "m".parse().unwrap();
        assert!(m.is_empty());
        assert_eq!(m, DerivationPath::master());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("44'/0'/0'".parse::<DerivationPath>().is_err());
        assert!("m//0".parse::<DerivationPath>().is_err());
        assert!("m/abc".parse::<DerivationPath>().is_err());
        assert!("m/-1".parse::<DerivationPath>().is_err());
        assert!("m/'".parse::<DerivationPath>().is_err());
        assert!("m/2147483648".parse::<DerivationPath>().is_err());
        assert!("invalid".parse::<DerivationPath>().is_err());
    }

    #[test]
    fn test_child_index_raw() {
        assert_eq!(ChildIndex::hardened(44).raw(), 0x8000_002C);
        assert_eq!(ChildIndex::normal(3).raw(), 3);
        assert_eq!(ChildIndex::from_raw(0x8000_0000), ChildIndex::hardened(0));
        assert!(ChildIndex::new(HARDENED_OFFSET, false).is_err());
    }

    #[test]
    fn test_child_index_next() {
        assert_eq!(ChildIndex::hardened(4).next().unwrap(), ChildIndex::hardened(5));
        assert!(ChildIndex::normal(HARDENED_OFFSET - 1).next().is_err());
    }
}
