// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation: BIP-32 / BIP-44
//
// Dùng cho: Bitcoin, Ethereum/EVM (ETH, USDT ERC-20)
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use crate::crypto::hash::{hash160, hmac_sha512_split};
use crate::crypto::key_deriver::{CurveType, DerivedKey, InvalidChildPolicy};
use crate::crypto::paths::{ChildIndex, DerivationPath};
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::{
    elliptic_curve::{sec1::ToEncodedPoint, PrimeField},
    AffinePoint, FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar, SecretKey,
};
use zeroize::{Zeroize, Zeroizing};

/// BIP-32 master key domain separator
const MASTER_SECRET: &[u8] = b"Bitcoin seed";

/// BIP-32 chỉ chấp nhận seed 128..512 bits
const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

/// Extended key node of the BIP-32 tree.
///
/// Holds the private scalar when available; public-only nodes come from
/// [`ExtendedKey::neuter`] and can only walk non-hardened steps.
#[derive(Clone)]
pub struct ExtendedKey {
    private_key: Option<SecretKey>,
    public_key: PublicKey,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        // SecretKey tự zeroize; chain code thì phải xóa tay
        self.chain_code.zeroize();
    }
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị private key / chain code
impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("public_key", &hex::encode(self.public_key_compressed()))
            .field("has_private_key", &self.private_key.is_some())
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &ChildIndex::from_raw(self.child_number))
            .finish_non_exhaustive()
    }
}

impl ExtendedKey {
    // =========================================================================
    // MASTER KEY
    // =========================================================================

    /// I = HMAC-SHA512(Key = "Bitcoin seed", Data = seed)
    /// IL = master secret key, IR = master chain code
    pub fn master_from_seed(seed: &[u8]) -> WalletResult<Self> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(CryptoError::InvalidSeed(format!(
                "seed must be {}..={} bytes, got {}",
                MIN_SEED_LEN,
                MAX_SEED_LEN,
                seed.len()
            ))
            .into());
        }

        let (il, ir) = hmac_sha512_split(MASTER_SECRET, &[seed])?;

        // IL = 0 hoặc IL >= n thì master key không hợp lệ
        let private_key = SecretKey::from_bytes(&FieldBytes::from(*il)).map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidSeed(
                "master secret is zero or not below the curve order".to_string(),
            ))
        })?;

        Ok(Self {
            public_key: private_key.public_key(),
            private_key: Some(private_key),
            chain_code: *ir,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
        })
    }

    // =========================================================================
    // CHILD DERIVATION
    // =========================================================================

    /// CKDpriv / CKDpub for one step.
    ///
    /// - hardened: `I = HMAC-SHA512(c, 0x00 || k || ser32(i))`
    /// - normal:   `I = HMAC-SHA512(c, serP(K) || ser32(i))`
    ///
    /// The child key is `parse256(IL) + k (mod n)`, or `IL·G + K` for a
    /// public-only parent. An unusable IL surfaces as
    /// [`CryptoError::InvalidChild`].
    pub fn derive_child(&self, child: ChildIndex) -> WalletResult<Self> {
        let raw = child.raw();
        let depth = self.depth.checked_add(1).ok_or_else(|| {
            WalletError::Crypto(CryptoError::DerivationFailed(
                "maximum derivation depth (255) exceeded".to_string(),
            ))
        })?;

        let (il, ir) = if child.is_hardened() {
            let secret = self
                .private_key
                .as_ref()
                .ok_or(WalletError::Crypto(CryptoError::HardenedFromPublic(raw)))?;
            let secret_bytes = Zeroizing::new(<[u8; 32]>::from(secret.to_bytes()));
            hmac_sha512_split(
                &self.chain_code,
                &[&[0x00], secret_bytes.as_slice(), &raw.to_be_bytes()],
            )?
        } else {
            hmac_sha512_split(
                &self.chain_code,
                &[&self.public_key_compressed(), &raw.to_be_bytes()],
            )?
        };

        let invalid_child = || WalletError::Crypto(CryptoError::InvalidChild { index: raw });

        // parse256(IL) >= n → invalid
        let tweak = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*il)))
            .ok_or_else(invalid_child)?;

        let (private_key, public_key) = match &self.private_key {
            Some(parent) => {
                let sum = *parent.to_nonzero_scalar() + tweak;
                let scalar =
                    Option::<NonZeroScalar>::from(NonZeroScalar::new(sum)).ok_or_else(invalid_child)?;
                let secret = SecretKey::from(scalar);
                let public = secret.public_key();
                (Some(secret), public)
            }
            None => {
                let point = ProjectivePoint::GENERATOR * tweak + self.public_key.to_projective();
                let public =
                    PublicKey::from_affine(AffinePoint::from(point)).map_err(|_| invalid_child())?;
                (None, public)
            }
        };

        Ok(Self {
            private_key,
            public_key,
            chain_code: *ir,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: raw,
        })
    }

    /// Fold [`derive_child`](Self::derive_child) over every step of `path`.
    pub fn derive_path(&self, path: &DerivationPath) -> WalletResult<Self> {
        path.iter()
            .try_fold(self.clone(), |node, step| node.derive_child(*step))
    }

    /// Walk `path`, applying `policy` when a step yields an invalid key.
    ///
    /// With [`InvalidChildPolicy::NextIndex`] the failing step is retried at
    /// index + 1 (BIP-32). The returned path is the one actually walked, so
    /// callers can persist it and re-derive the same key later.
    pub fn derive_path_with_policy(
        &self,
        path: &DerivationPath,
        policy: InvalidChildPolicy,
    ) -> WalletResult<(Self, DerivationPath)> {
        let mut node = self.clone();
        let mut walked = Vec::with_capacity(path.len());

        for &step in path {
            let (child, used) =
                derive_step_with_policy(step, policy, |index| node.derive_child(index))?;
            node = child;
            walked.push(used);
        }

        Ok((node, DerivationPath::from_steps(walked)))
    }

    /// Public-only copy of this node (xpub equivalent).
    pub fn neuter(&self) -> Self {
        Self {
            private_key: None,
            public_key: self.public_key,
            chain_code: self.chain_code,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
        }
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    pub fn private_key_bytes(&self) -> Option<Zeroizing<[u8; 32]>> {
        self.private_key
            .as_ref()
            .map(|sk| Zeroizing::new(sk.to_bytes().into()))
    }

    #[inline]
    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    #[inline]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// serP(K): 33-byte SEC1 compressed point
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out.copy_from_slice(self.public_key.to_encoded_point(true).as_bytes());
        out
    }

    /// 65-byte SEC1 uncompressed point (0x04 || X || Y)
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out.copy_from_slice(self.public_key.to_encoded_point(false).as_bytes());
        out
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    #[inline]
    pub fn child_number(&self) -> ChildIndex {
        ChildIndex::from_raw(self.child_number)
    }

    /// First 4 bytes of HASH160(serP(K))
    pub fn fingerprint(&self) -> [u8; 4] {
        let id = hash160(&self.public_key_compressed());
        [id[0], id[1], id[2], id[3]]
    }
}

// =============================================================================
// INVALID CHILD POLICY
// =============================================================================

/// Run one derivation step, bumping the index while `derive` reports
/// [`CryptoError::InvalidChild`] and `policy` is
/// [`InvalidChildPolicy::NextIndex`].
///
/// Returns the derived value and the index that produced it.
fn derive_step_with_policy<T>(
    step: ChildIndex,
    policy: InvalidChildPolicy,
    mut derive: impl FnMut(ChildIndex) -> WalletResult<T>,
) -> WalletResult<(T, ChildIndex)> {
    let mut current = step;
    loop {
        match derive(current) {
            Ok(child) => return Ok((child, current)),
            Err(WalletError::Crypto(CryptoError::InvalidChild { index }))
                if policy == InvalidChildPolicy::NextIndex =>
            {
                tracing::warn!(index, "invalid BIP-32 child key, retrying with next index");
                current = current.next()?;
            }
            Err(e) => return Err(e),
        }
    }
}

// =============================================================================
// DERIVER
// =============================================================================

/// secp256k1 Key Deriver: BIP-32 Standard
///
/// # Security
/// - Private keys wrap trong `Zeroizing<[u8; 32]>` (auto-zeroize khi drop)
/// - Intermediate nodes bị drop (và zeroize) ngay sau mỗi bước
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// Derive the terminal key for `path` from a BIP-39 seed.
    pub fn derive(
        seed: &[u8],
        path: &DerivationPath,
        policy: InvalidChildPolicy,
    ) -> WalletResult<DerivedKey> {
        let master = ExtendedKey::master_from_seed(seed)?;
        let (node, used_path) = master.derive_path_with_policy(path, policy)?;

        let private_key = node.private_key_bytes().ok_or_else(|| {
            WalletError::Crypto(CryptoError::DerivationFailed(
                "derived node carries no private key".to_string(),
            ))
        })?;

        Ok(DerivedKey {
            private_key,
            public_key: node.public_key_compressed().to_vec(),
            curve: CurveType::Secp256k1,
            path: used_path,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
