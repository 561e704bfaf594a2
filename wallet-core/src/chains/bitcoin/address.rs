// wallet-core/src/chains/bitcoin/address.rs
//
// Bitcoin Address Module: Legacy P2PKH + WIF
// Base58Check, Hash160, secp256k1 (compressed)

use crate::chains::{AddressEncoder, Chain, ChainKeys, Network};
use crate::crypto::hash::hash160;
use crate::crypto::DerivedKey;
use crate::error::{ChainError, CryptoError, WalletError, WalletResult};
use k256::PublicKey;
use zeroize::Zeroizing;

/// Version bytes (Base58Check prefix)
const P2PKH_MAINNET: u8 = 0x00;
const P2PKH_TESTNET: u8 = 0x6f;
const WIF_MAINNET: u8 = 0x80;
const WIF_TESTNET: u8 = 0xef;

/// Suffix đánh dấu WIF cho compressed public key
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Decoded WIF private key
pub struct WifKey {
    pub private_key: Zeroizing<[u8; 32]>,
    pub network: Network,
    pub compressed: bool,
}

impl std::fmt::Debug for WifKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WifKey")
            .field("network", &self.network)
            .field("compressed", &self.compressed)
            .finish_non_exhaustive()
    }
}

/// Bitcoin P2PKH / WIF helpers
///
/// # Flow:  Public Key (33B) → SHA256 → RIPEMD160 → version ‖ hash → Base58Check
pub struct BitcoinAddress;

impl BitcoinAddress {
    pub const fn p2pkh_version(network: Network) -> u8 {
        match network {
            Network::Mainnet => P2PKH_MAINNET,
            Network::Testnet => P2PKH_TESTNET,
        }
    }

    pub const fn wif_version(network: Network) -> u8 {
        match network {
            Network::Mainnet => WIF_MAINNET,
            Network::Testnet => WIF_TESTNET,
        }
    }

    // =========================================================================
    // P2PKH
    // =========================================================================

    /// P2PKH address từ SEC1 public key (compressed hoặc uncompressed).
    ///
    /// Hash160 được tính trên đúng dạng bytes truyền vào; wallet này luôn
    /// dùng compressed key (33B).
    pub fn p2pkh_from_public_key(public_key: &[u8], network: Network) -> WalletResult<String> {
        PublicKey::from_sec1_bytes(public_key).map_err(|e| {
            ChainError::derivation(Chain::Btc, format!("invalid secp256k1 public key: {}", e))
        })?;
        Ok(Self::p2pkh_from_hash(&hash160(public_key), network))
    }

    pub fn p2pkh_from_hash(pubkey_hash: &[u8; 20], network: Network) -> String {
        let mut payload = [0u8; 21];
        payload[0] = Self::p2pkh_version(network);
        payload[1..].copy_from_slice(pubkey_hash);
        bs58::encode(payload).with_check().into_string()
    }

    /// Decode P2PKH address → (network, hash160). Sai checksum / version → lỗi.
    pub fn decode_p2pkh(address: &str) -> WalletResult<(Network, [u8; 20])> {
        let invalid = || -> WalletError {
            ChainError::InvalidAddress {
                chain: Chain::Btc,
                address: address.to_string(),
            }
            .into()
        };

        let payload = bs58::decode(address)
            .with_check(None)
            .into_vec()
            .map_err(|_| invalid())?;
        if payload.len() != 21 {
            return Err(invalid());
        }

        let network = match payload[0] {
            P2PKH_MAINNET => Network::Mainnet,
            P2PKH_TESTNET => Network::Testnet,
            _ => return Err(invalid()),
        };

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&payload[1..]);
        Ok((network, hash))
    }

    #[inline]
    pub fn is_valid_p2pkh(address: &str, network: Network) -> bool {
        matches!(Self::decode_p2pkh(address), Ok((n, _)) if n == network)
    }

    // =========================================================================
    // WIF
    // =========================================================================

    /// WIF = Base58Check(version ‖ key ‖ 0x01)
    pub fn encode_wif(private_key: &[u8; 32], network: Network) -> Zeroizing<String> {
        let mut payload = Zeroizing::new([0u8; 34]);
        payload[0] = Self::wif_version(network);
        payload[1..33].copy_from_slice(private_key);
        payload[33] = WIF_COMPRESSED_FLAG;
        Zeroizing::new(bs58::encode(payload.as_slice()).with_check().into_string())
    }

    /// Decode WIF (compressed hoặc uncompressed)
    pub fn decode_wif(wif: &str) -> WalletResult<WifKey> {
        let invalid = |reason: &str| -> WalletError {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!("Invalid WIF: {}", reason)))
        };

        let payload = Zeroizing::new(
            bs58::decode(wif)
                .with_check(None)
                .into_vec()
                .map_err(|e| invalid(&e.to_string()))?,
        );

        let compressed = match payload.len() {
            34 if payload[33] == WIF_COMPRESSED_FLAG => true,
            33 => false,
            _ => return Err(invalid("unexpected payload length")),
        };

        let network = match payload[0] {
            WIF_MAINNET => Network::Mainnet,
            WIF_TESTNET => Network::Testnet,
            _ => return Err(invalid("unknown version byte")),
        };

        let mut private_key = Zeroizing::new([0u8; 32]);
        private_key.copy_from_slice(&payload[1..33]);

        Ok(WifKey {
            private_key,
            network,
            compressed,
        })
    }
}

// =============================================================================
// ENCODER
// =============================================================================

/// Legacy P2PKH encoder for one network.
#[derive(Debug, Clone, Copy)]
pub struct BitcoinEncoder {
    network: Network,
}

impl BitcoinEncoder {
    pub fn new(network: Network) -> Self {
        Self { network }
    }
}

impl AddressEncoder for BitcoinEncoder {
    fn chain(&self) -> Chain {
        Chain::Btc
    }

    fn encode(&self, key: &DerivedKey) -> WalletResult<ChainKeys> {
        self.ensure_curve(key)?;
        if key.public_key.len() != 33 {
            return Err(ChainError::derivation(
                Chain::Btc,
                format!("expected 33-byte compressed key, got {}", key.public_key.len()),
            )
            .into());
        }

        Ok(ChainKeys {
            address: BitcoinAddress::p2pkh_from_public_key(&key.public_key, self.network)?,
            private_key: BitcoinAddress::encode_wif(&key.private_key, self.network),
            public_key: hex::encode(&key.public_key),
        })
    }

    fn is_valid_address(&self, address: &str) -> bool {
        BitcoinAddress::is_valid_p2pkh(address, self.network)
    }
}

// =============================================================================
// TESTS
// =============================================================================
