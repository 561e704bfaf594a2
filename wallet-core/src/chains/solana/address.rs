// wallet-core/src/chains/solana/address.rs
//
// Solana Address Module: Base58 Ed25519

use crate::chains::{AddressEncoder, Chain, ChainKeys};
use crate::crypto::DerivedKey;
use crate::error::{ChainError, CryptoError, WalletError, WalletResult};
use ed25519_dalek::{SigningKey, VerifyingKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH};
use zeroize::Zeroizing;

pub struct SolanaAddress;

impl SolanaAddress {
    /// Address = Base58(32-byte Ed25519 public key)
    pub fn from_public_key(public_key: &[u8]) -> WalletResult<String> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] = public_key.try_into().map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Ed25519 public key must be {} bytes, got {}",
                PUBLIC_KEY_LENGTH,
                public_key.len()
            )))
        })?;
        VerifyingKey::from_bytes(&bytes).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid Ed25519 public key: {}",
                e
            )))
        })?;
        Ok(bs58::encode(bytes).into_string())
    }

    /// Base58(secret ‖ public), định dạng keypair 64 bytes mà Phantom / solana-cli import
    pub fn keypair_base58(secret: &[u8; 32]) -> Zeroizing<String> {
        let signing_key = SigningKey::from_bytes(secret);
        let keypair = Zeroizing::new(signing_key.to_keypair_bytes());
        Zeroizing::new(bs58::encode(keypair.as_slice()).into_string())
    }

    /// Address hợp lệ = Base58 decode ra đúng 32 bytes
    pub fn is_valid(address: &str) -> bool {
        matches!(bs58::decode(address).into_vec(), Ok(bytes) if bytes.len() == PUBLIC_KEY_LENGTH)
    }

    /// True khi `keypair` (Base58, 64 bytes) nhất quán và public half trùng `address`
    pub fn keypair_matches(keypair: &str, address: &str) -> bool {
        let Ok(decoded) = bs58::decode(keypair).into_vec().map(Zeroizing::new) else {
            return false;
        };
        let Ok(bytes) = <&[u8; KEYPAIR_LENGTH]>::try_from(decoded.as_slice()) else {
            return false;
        };
        // from_keypair_bytes kiểm tra public half khớp với secret half
        match SigningKey::from_keypair_bytes(bytes) {
            Ok(signing_key) => {
                bs58::encode(signing_key.verifying_key().as_bytes()).into_string() == address
            }
            Err(_) => false,
        }
    }
}

// =============================================================================
// ENCODER
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct SolanaEncoder;

impl AddressEncoder for SolanaEncoder {
    fn chain(&self) -> Chain {
        Chain::Sol
    }

    fn encode(&self, key: &DerivedKey) -> WalletResult<ChainKeys> {
        self.ensure_curve(key)?;
        let address = SolanaAddress::from_public_key(&key.public_key)
            .map_err(|e| ChainError::derivation(Chain::Sol, e.to_string()))?;

        let expected = SigningKey::from_bytes(&key.private_key).verifying_key();
        if expected.as_bytes().as_slice() != key.public_key.as_slice() {
            return Err(
                ChainError::derivation(Chain::Sol, "public key does not match private key").into(),
            );
        }

        Ok(ChainKeys {
            address,
            private_key: SolanaAddress::keypair_base58(&key.private_key),
            public_key: hex::encode(&key.public_key),
        })
    }

    fn is_valid_address(&self, address: &str) -> bool {
        SolanaAddress::is_valid(address)
    }
}

// =============================================================================
// TESTS
// =============================================================================
