// wallet-core/src/crypto/key_deriver/ed25519.rs
//
// Ed25519 Key Derivation: SLIP-0010 Standard
//
// Dùng cho: Solana
// Algorithm: HMAC-SHA512 (khác BIP-32, chỉ hỗ trợ hardened derivation)
// Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//
// QUAN TRỌNG: SLIP-0010 cho ed25519 CHỈ hỗ trợ hardened child derivation.
// Tất cả levels trong path PHẢI là hardened (có dấu ').
// VD: m/44'/501'/0'/0' (OK)    m/44'/501'/0'/0 (INVALID)

use crate::crypto::hash::hmac_sha512_split;
use crate::crypto::key_deriver::{CurveType, DerivedKey};
use crate::crypto::paths::DerivationPath;
use crate::error::{CryptoError, WalletResult};
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

/// Ed25519 Key Deriver: SLIP-0010 Standard
///
/// # Khác biệt với secp256k1 (BIP-32)
/// - Master key seed: "ed25519 seed" (thay vì "Bitcoin seed")
/// - Chỉ hỗ trợ hardened derivation (index >= 2^31)
/// - Không cần validate key range (ed25519 key là bất kỳ 32 bytes)
pub struct Ed25519Deriver;

impl Ed25519Deriver {
    /// SLIP-0010 master key seed constant
    const MASTER_SECRET: &'static [u8] = b"ed25519 seed";

    /// Derive ed25519 private key + public key từ seed + path
    ///
    /// # Arguments
    /// * `seed` - 64 bytes BIP-39 seed
    /// * `path` - Derivation path, all levels MUST be hardened
    ///            e.g., "m/44'/501'/0'/0'"
    pub fn derive(seed: &[u8], path: &DerivationPath) -> WalletResult<DerivedKey> {
        let private_key = Self::derive_private_key(seed, path)?;
        let public_key = SigningKey::from_bytes(&private_key)
            .verifying_key()
            .to_bytes()
            .to_vec();

        Ok(DerivedKey {
            private_key,
            public_key,
            curve: CurveType::Ed25519,
            path: path.clone(),
        })
    }

    /// Derive raw 32-byte ed25519 private key, auto-zeroize on drop
    pub fn derive_private_key(
        seed: &[u8],
        path: &DerivationPath,
    ) -> WalletResult<Zeroizing<[u8; 32]>> {
        Self::ensure_hardened(path)?;

        // Step 1: Master key generation
        // I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
        let (mut key, mut chain_code) = hmac_sha512_split(Self::MASTER_SECRET, &[seed])?;

        // Step 2: Child key derivation (mỗi level)
        // I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(index | 2^31))
        // Giá trị cũ được Zeroizing xóa khi bị overwrite
        for step in path {
            (key, chain_code) = hmac_sha512_split(
                chain_code.as_slice(),
                &[&[0x00], key.as_slice(), &step.raw().to_be_bytes()],
            )?;
        }

        Ok(key)
    }

    fn ensure_hardened(path: &DerivationPath) -> WalletResult<()> {
        if let Some(step) = path.iter().find(|s| !s.is_hardened()) {
            return Err(CryptoError::InvalidPath(format!(
                "Ed25519 SLIP-0010 requires ALL levels to be hardened (add '). Invalid segment '{}' in {}",
                step, path
            ))
            .into());
        }
        Ok(())
    }

    /// Validate ed25519 path (tất cả levels phải hardened)
    pub fn is_valid_path(path: &str) -> bool {
        path.parse::<DerivationPath>()
            .map(|p| Self::ensure_hardened(&p).is_ok())
            .unwrap_or(false)
    }
}

// =============================================================================
// TESTS
// =============================================================================
