// wallet-core/src/crypto/hash.rs
//
// Hash primitives shared by the derivers and chain encoders.

use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

/// HMAC-SHA512 over the concatenation of `parts`, split into (IL, IR).
///
/// Both halves are key material and come back wrapped in `Zeroizing`.
pub fn hmac_sha512_split(
    key: &[u8],
    parts: &[&[u8]],
) -> WalletResult<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>)> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key).map_err(|e| {
        WalletError::Crypto(CryptoError::DerivationFailed(format!(
            "HMAC init failed: {}",
            e
        )))
    })?;
    for part in parts {
        mac.update(part);
    }
    let result = mac.finalize().into_bytes();

    let mut left = Zeroizing::new([0u8; 32]);
    let mut right = Zeroizing::new([0u8; 32]);
    left.copy_from_slice(&result[..32]);
    right.copy_from_slice(&result[32..]);
    Ok((left, right))
}
