// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - Multi-Curve Support
//
// Kiến trúc:
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │     ┌──────────────┴──────────────┐             │
// │     ▼                             ▼             │
// │  secp256k1 (BIP-32)        ed25519 (SLIP-0010)  │
// │  ├─ Bitcoin (P2PKH)        └─ Solana            │
// │  ├─ Ethereum                                    │
// │  └─ USDT (ERC-20)                               │
// └─────────────────────────────────────────────────┘

pub mod ed25519;
pub mod secp256k1;

// Re-exports
pub use ed25519::Ed25519Deriver;
pub use secp256k1::{ExtendedKey, Secp256k1Deriver};

use crate::crypto::paths::DerivationPath;
use crate::crypto::seed::SEED_LEN;
use crate::error::{CryptoError, WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

// =============================================================================
// COMMON TYPES
// =============================================================================
/// Curve type cho key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// secp256k1: Bitcoin, Ethereum, USDT
    Secp256k1,
    /// Ed25519: Solana
    Ed25519,
}

/// What to do when a BIP-32 step produces an invalid key (IL >= n or a zero key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidChildPolicy {
    /// Surface [`CryptoError::InvalidChild`] to the caller.
    Fail,
    /// Retry the step with index + 1, as BIP-32 recommends.
    #[default]
    NextIndex,
}

/// Kết quả derivation chứa private key + metadata
pub struct DerivedKey {
    /// Private key bytes (32 bytes, auto-zeroize khi drop)
    pub private_key: Zeroizing<[u8; 32]>,
    /// 33-byte compressed point (secp256k1) hoặc 32-byte key (ed25519)
    pub public_key: Vec<u8>,
    pub curve: CurveType,
    /// Path thực sự đã đi (có thể khác path yêu cầu nếu có retry)
    pub path: DerivationPath,
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("public_key", &hex::encode(&self.public_key))
            .field("curve", &self.curve)
            .field("path", &self.path.to_string())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Unified Key Deriver - Entry point cho mọi loại key derivation
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive key theo curve type
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed (64 bytes)
    /// * `path` - Derivation path (e.g., m/44'/60'/0'/0/0)
    /// * `curve` - Curve type (secp256k1 hoặc ed25519)
    /// * `policy` - Chỉ áp dụng cho secp256k1; ed25519 không có child key invalid
    pub fn derive(
        seed: &[u8],
        path: &DerivationPath,
        curve: CurveType,
        policy: InvalidChildPolicy,
    ) -> WalletResult<DerivedKey> {
        Self::validate_seed(seed)?;

        match curve {
            CurveType::Secp256k1 => Secp256k1Deriver::derive(seed, path, policy),
            CurveType::Ed25519 => Ed25519Deriver::derive(seed, path),
        }
    }

    /// Validate seed length
    #[inline]
    fn validate_seed(seed: &[u8]) -> WalletResult<()> {
        if seed.len() != SEED_LEN {
            return Err(WalletError::Crypto(CryptoError::InvalidSeed(format!(
                "expected {} bytes, got {}",
                SEED_LEN,
                seed.len()
            ))));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;

    const TEST_SEED: &str = "16270f7b026afe7a3746efbfcf43e083500951db9e2699d1e4f372515dabcc80459b9181c3937b5faa4b8f7602f886553d2c32c5f12f3331cef40153aead4de6";

    #[test]
    fn test_unified_secp256k1() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = KeyDeriver::derive(
            &seed,
            &DerivationPaths::evm(0),
            CurveType::Secp256k1,
            InvalidChildPolicy::default(),
        )
        .unwrap();
        assert_eq!(key.curve, CurveType::Secp256k1);
        assert_eq!(key.private_key.len(), 32);
        assert_eq!(key.public_key.len(), 33);
        assert_eq!(key.path.to_string(), DerivationPaths::EVM_0);
    }

    #[test]
    fn test_unified_ed25519() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = KeyDeriver::derive(
            &seed,
            &DerivationPaths::solana(0),
            CurveType::Ed25519,
            InvalidChildPolicy::default(),
        )
        .unwrap();
        assert_eq!(key.curve, CurveType::Ed25519);
        assert_eq!(key.public_key.len(), 32);
    }

    #[test]
    fn test_invalid_seed() {
        let bad_seed = [0u8; 32];
        let result = KeyDeriver::derive(
            &bad_seed,
            &DerivationPaths::evm(0),
            CurveType::Secp256k1,
            InvalidChildPolicy::Fail,
        );
        assert!(matches!(
            result,
            Err(WalletError::Crypto(CryptoError::InvalidSeed(_)))
        ));
    }

    #[test]
    fn test_different_curves_produce_different_keys() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let secp = KeyDeriver::derive(
            &seed,
            &"m/44'/60'/0'/0'".parse().unwrap(),
            CurveType::Secp256k1,
            InvalidChildPolicy::Fail,
        )
        .unwrap();
        let ed = KeyDeriver::derive(
            &seed,
            &"m/44'/60'/0'/0'".parse().unwrap(),
            CurveType::Ed25519,
            InvalidChildPolicy::Fail,
        )
        .unwrap();
        assert_ne!(&*secp.private_key, &*ed.private_key);
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = KeyDeriver::derive(
            &seed,
            &DerivationPaths::evm(0),
            CurveType::Secp256k1,
            InvalidChildPolicy::Fail,
        )
        .unwrap();
        let debug_output = format!("{:?}", key);
        assert!(!debug_output.contains(&hex::encode(*key.private_key)));
        assert!(debug_output.contains("m/44'/60'/0'/0/0"));
    }

    #[test]
    fn test_policy_serde() {
        let p: InvalidChildPolicy = serde_json::from_str("\"next_index\"").unwrap();
        assert_eq!(p, InvalidChildPolicy::NextIndex);
        let p: InvalidChildPolicy = serde_json::from_str("\"fail\"").unwrap();
        assert_eq!(p, InvalidChildPolicy::Fail);
    }
}
