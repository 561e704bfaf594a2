// wallet-core/src/crypto/seed.rs
//
// BIP-39 seed: PBKDF2-HMAC-SHA512, 2048 rounds, salt = "mnemonic" || passphrase

use crate::crypto::mnemonic::WalletMnemonic;
use crate::error::WalletResult;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const SEED_LEN: usize = 64;

/// 512-bit seed. Ephemeral: recomputed from the stored phrase whenever needed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    pub fn new(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

/// Stretch a phrase into a seed. The phrase is validated first, so a
/// checksum-invalid mnemonic is rejected before any key material exists.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> WalletResult<Seed> {
    WalletMnemonic::from_phrase(phrase)?.to_seed(passphrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MnemonicError, WalletError};

    const TEST_MNEMONIC: &str =
        "legal winner thank year wave sausage worth useful legal winner thank yellow";

    #[test]
    fn test_mnemonic_to_seed_vector() {
        let seed = mnemonic_to_seed(TEST_MNEMONIC, "TREZOR").unwrap();
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "2e8905819b8723fe2c1d161860e5ee1830318dbf49a83bd451cfb8440c28bd6fa457fe1296106559a3c80937a1c1069be3a3a5bd381ee6260e8d9739fce1f607"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = mnemonic_to_seed(TEST_MNEMONIC, "pass").unwrap();
        let b = mnemonic_to_seed(TEST_MNEMONIC, "pass").unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_invalid_phrase_rejected() {
        let err = mnemonic_to_seed("legal winner thank", "").unwrap_err();
        assert_eq!(err, WalletError::Mnemonic(MnemonicError::InvalidWordCount(3)));
    }

    #[test]
    fn test_debug_redacted() {
        let seed = Seed::new([7u8; SEED_LEN]);
        assert_eq!(format!("{:?}", seed), "Seed([REDACTED])");
    }
}
