// wallet-core/src/chains/evm/address.rs
//
// EVM Address Module: ETH + USDT (ERC-20)
// EIP-55 (Checksum), Keccak-256, secp256k1

use crate::chains::{AddressEncoder, Chain, ChainKeys};
use crate::crypto::hash::keccak256;
use crate::crypto::DerivedKey;
use crate::error::{ChainError, CryptoError, WalletError, WalletResult};
use alloy::primitives::Address;
use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey, SecretKey};
use zeroize::{Zeroize, Zeroizing};

/// EVM Address Generator
///
/// # Flow:  Public Key (33B/65B) → uncompressed (64B) → Keccak256 → Address (20B)
///
/// # Security
/// - Zeroize: intermediate hash bị xóa sau khi dùng
/// - No Storage: Module này KHÔNG lưu private key
pub struct EvmAddress;

impl EvmAddress {
    // =========================================================================
    // CORE: Public Key → Address Bytes (20 bytes)
    // =========================================================================

    /// Derive 20 bytes address từ SEC1 public key (compressed hoặc uncompressed).
    ///
    /// # Algorithm (chuẩn Ethereum Yellow Paper)
    /// 1. `pub_key` → uncompressed (65B)
    /// 2. Bỏ prefix byte 0x04 → `pub_key_raw` (64B)
    /// 3. Keccak-256(`pub_key_raw`) → `hash` (32B)
    /// 4. `hash[12..32]` → `address` (20B)
    pub fn bytes_from_public_key(public_key: &[u8]) -> WalletResult<[u8; 20]> {
        let public_key = PublicKey::from_sec1_bytes(public_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 public key: {}",
                e
            )))
        })?;
        Ok(Self::bytes_from_point(&public_key))
    }

    /// EIP-55 checksummed address từ SEC1 public key
    #[inline]
    pub fn from_public_key(public_key: &[u8]) -> WalletResult<String> {
        let bytes = Self::bytes_from_public_key(public_key)?;
        Ok(Address::from_slice(&bytes).to_checksum(None))
    }

    fn bytes_from_point(public_key: &PublicKey) -> [u8; 20] {
        let encoded = public_key.to_encoded_point(false);
        let pub_key_raw = &encoded.as_bytes()[1..]; // Bỏ 0x04 prefix

        let mut hash = keccak256(pub_key_raw);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        hash.zeroize();

        address
    }

    // =========================================================================
    // PRIVATE KEY API
    // =========================================================================

    /// EIP-55 checksummed address từ raw 32-byte secp256k1 private key.
    ///
    /// # ⚠ Security Note
    /// The caller is responsible for zeroing `priv_key` after this call.
    pub fn from_private_key(priv_key: &[u8]) -> WalletResult<String> {
        let secret_key = SecretKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;
        let bytes = Self::bytes_from_point(&secret_key.public_key());
        Ok(Address::from_slice(&bytes).to_checksum(None))
    }

    /// Private key string lưu trong wallet record: `0x` + 64 hex lowercase
    pub fn format_private_key(priv_key: &[u8; 32]) -> Zeroizing<String> {
        Zeroizing::new(format!("0x{}", hex::encode(priv_key)))
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Validate chuỗi có phải Ethereum address hợp lệ không
    ///
    /// Kiểm tra: `0x` prefix + 40 hex chars + EIP-55 checksum (nếu mixed case)
    pub fn is_valid(address: &str) -> bool {
        let Some(body) = address.strip_prefix("0x") else {
            return false;
        };
        if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return false;
        }

        let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            return Self::is_valid_checksum(address);
        }
        true
    }

    /// EIP-55 self-check: chuỗi phải trùng khớp với casing checksum của chính nó
    #[inline]
    pub fn is_valid_checksum(address: &str) -> bool {
        Address::parse_checksummed(address, None).is_ok()
    }

    /// Normalize về EIP-55 checksum format
    ///
    /// `"0xabcd..."` → `"0xAbCd..."` (mixed-case theo checksum)
    pub fn to_checksum(address: &str) -> WalletResult<String> {
        let addr: Address = address.parse().map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "Invalid Ethereum address format".to_string(),
            ))
        })?;
        Ok(addr.to_checksum(None))
    }

    /// So sánh 2 address (case-insensitive, zero-allocation)
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (addr1.parse::<Address>(), addr2.parse::<Address>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

// =============================================================================
// ENCODER
// =============================================================================

/// Encoder cho ETH và USDT; USDT là ERC-20 nên dùng chung address với ETH.
#[derive(Debug, Clone, Copy)]
pub struct EvmEncoder {
    chain: Chain,
}

impl EvmEncoder {
    pub fn new(chain: Chain) -> Self {
        Self { chain }
    }
}

impl AddressEncoder for EvmEncoder {
    fn chain(&self) -> Chain {
        self.chain
    }

    fn encode(&self, key: &DerivedKey) -> WalletResult<ChainKeys> {
        self.ensure_curve(key)?;
        let address = EvmAddress::from_private_key(key.private_key.as_slice())
            .map_err(|e| ChainError::derivation(self.chain, e.to_string()))?;
        let from_public = EvmAddress::from_public_key(&key.public_key)
            .map_err(|e| ChainError::derivation(self.chain, e.to_string()))?;
        if from_public != address {
            return Err(ChainError::derivation(
                self.chain,
                "public key does not match private key",
            )
            .into());
        }

        Ok(ChainKeys {
            address,
            private_key: EvmAddress::format_private_key(&key.private_key),
            public_key: hex::encode(&key.public_key),
        })
    }

    fn is_valid_address(&self, address: &str) -> bool {
        EvmAddress::is_valid(address)
    }
}

// =============================================================================
// TESTS
// =============================================================================
