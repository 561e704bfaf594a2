// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 entropy & word encoding
// Chuẩn: BIP-39 (Mnemonic), entropy từ OS CSPRNG

use crate::crypto::seed::Seed;
use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::{Language, Mnemonic};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Số lượng words hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    pub const ALL: [WordCount; 5] = [
        WordCount::Twelve,
        WordCount::Fifteen,
        WordCount::Eighteen,
        WordCount::TwentyOne,
        WordCount::TwentyFour,
    ];

    /// Lấy số bytes entropy cần thiết
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }

    #[inline]
    pub const fn strength_bits(self) -> usize {
        self.entropy_bytes() * 8
    }

    /// Checksum length is `strength / 32` bits.
    #[inline]
    pub const fn checksum_bits(self) -> usize {
        self.strength_bits() / 32
    }

    pub fn from_strength(bits: usize) -> WalletResult<Self> {
        Self::ALL
            .into_iter()
            .find(|wc| wc.strength_bits() == bits)
            .ok_or(WalletError::Mnemonic(MnemonicError::InvalidStrength(bits)))
    }

    pub fn from_words(count: usize) -> WalletResult<Self> {
        Self::try_from(count).map_err(|_| MnemonicError::InvalidWordCount(count).into())
    }
}

impl Default for WordCount {
    fn default() -> Self {
        WordCount::Twelve
    }
}

impl TryFrom<usize> for WordCount {
    type Error = String;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|wc| *wc as usize == count)
            .ok_or_else(|| format!("unsupported word count {count}"))
    }
}

impl From<WordCount> for usize {
    fn from(wc: WordCount) -> Self {
        wc as usize
    }
}

/// Wallet Mnemonic - BIP-39 phrase owned by one user
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: Phrase được tự động ghi đè bằng 0 khi struct bị drop
/// - **CSPRNG**: Chỉ dùng `OsRng`; nếu OS không cấp được entropy thì báo lỗi, không fallback
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Tạo mnemonic mới với 12 words (128-bit entropy)
    pub fn new() -> WalletResult<Self> {
        Self::generate(WordCount::Twelve)
    }

    /// Tạo mnemonic mới với 24 words (256-bit entropy)
    pub fn new_24_words() -> WalletResult<Self> {
        Self::generate(WordCount::TwentyFour)
    }

    /// Tạo mnemonic theo strength (bits): 128, 160, 192, 224 hoặc 256
    pub fn generate_with_strength(bits: usize) -> WalletResult<Self> {
        Self::generate(WordCount::from_strength(bits)?)
    }

    /// Tạo mnemonic với số lượng words tùy chỉnh
    ///
    /// Entropy is drawn with `try_fill_bytes` so an unavailable OS source
    /// surfaces as [`MnemonicError::Entropy`].
    pub fn generate(word_count: WordCount) -> WalletResult<Self> {
        let entropy_size = word_count.entropy_bytes();

        // Stack-allocated entropy buffer (max 32 bytes)
        let mut entropy = Zeroizing::new([0u8; 32]);
        OsRng
            .try_fill_bytes(&mut entropy[..entropy_size])
            .map_err(|e| MnemonicError::Entropy(e.to_string()))?;

        Self::from_entropy(&entropy[..entropy_size])
    }

    /// Encode entropy thành mnemonic (deterministic)
    pub fn from_entropy(entropy: &[u8]) -> WalletResult<Self> {
        let word_count = WordCount::from_strength(entropy.len() * 8)?;
        let mnemonic = Mnemonic::from_entropy(entropy)
            .map_err(|e| MnemonicError::Bip39Error(e.to_string()))?;

        Ok(Self {
            phrase: mnemonic.to_string(),
            word_count: word_count as usize,
        })
    }

    /// Khôi phục mnemonic từ phrase có sẵn
    ///
    /// # Validation
    /// - Kiểm tra số lượng words (12, 15, 18, 21, 24)
    /// - Kiểm tra từng word có trong BIP-39 wordlist
    /// - Kiểm tra checksum
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let count = normalized.len();

        if WordCount::try_from(count).is_err() {
            return Err(MnemonicError::InvalidWordCount(count).into());
        }

        if let Some(unknown) = normalized.iter().find(|w| !Self::is_valid_word(w)) {
            return Err(MnemonicError::UnknownWord((*unknown).to_string()).into());
        }

        let normalized_phrase = normalized.join(" ");
        parse(&normalized_phrase)?;

        Ok(Self {
            phrase: normalized_phrase,
            word_count: count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Lấy mnemonic phrase
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    /// Lấy strength (bit) của mnemonic
    pub fn strength_bits(&self) -> usize {
        WordCount::try_from(self.word_count)
            .map(WordCount::strength_bits)
            .unwrap_or(0)
    }

    /// Decode the phrase back to its raw entropy.
    pub fn entropy(&self) -> WalletResult<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(parse(&self.phrase)?.to_entropy()))
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// Tạo seed từ mnemonic (PBKDF2-HMAC-SHA512, 2048 rounds)
    ///
    /// Passphrase khác với password. Nếu mất passphrase, không thể khôi phục ví
    /// ngay cả khi có mnemonic phrase.
    pub fn to_seed(&self, passphrase: &str) -> WalletResult<Seed> {
        let mnemonic = parse(&self.phrase)?;
        Ok(Seed::new(mnemonic.to_seed(passphrase)))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Kiểm tra xem phrase có hợp lệ không. Không bao giờ trả lỗi.
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }

    /// Kiểm tra một từ có trong BIP-39 English wordlist không
    #[inline]
    pub fn is_valid_word(word: &str) -> bool {
        Language::English.find_word(word).is_some()
    }
}

fn parse(phrase: &str) -> WalletResult<Mnemonic> {
    Mnemonic::parse_in_normalized(Language::English, phrase).map_err(|e| {
        let err = match e {
            bip39::Error::BadWordCount(n) => MnemonicError::InvalidWordCount(n),
            bip39::Error::UnknownWord(i) => MnemonicError::UnknownWord(
                phrase
                    .split_whitespace()
                    .nth(i)
                    .unwrap_or_default()
                    .to_string(),
            ),
            bip39::Error::InvalidChecksum => MnemonicError::ChecksumFailed,
            other => MnemonicError::Bip39Error(other.to_string()),
        };
        WalletError::Mnemonic(err)
    })
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Standard test mnemonic (from BIP-39 test vectors)
    const TEST_MNEMONIC_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const TEST_MNEMONIC_24: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn test_new_12_words() {
        let mnemonic = WalletMnemonic::new().unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert!(WalletMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_new_24_words() {
        let mnemonic = WalletMnemonic::new_24_words().unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert!(WalletMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_every_strength_maps_to_word_count() {
        for (bits, words) in [(128, 12), (160, 15), (192, 18), (224, 21), (256, 24)] {
            let mnemonic = WalletMnemonic::generate_with_strength(bits).unwrap();
            assert_eq!(mnemonic.word_count(), words);
            assert_eq!(mnemonic.strength_bits(), bits);
            assert!(WalletMnemonic::validate(mnemonic.phrase()));
        }
    }

    #[test]
    fn test_invalid_strength() {
        assert_eq!(
            WalletMnemonic::generate_with_strength(100).unwrap_err(),
            WalletError::Mnemonic(MnemonicError::InvalidStrength(100))
        );
    }

    #[test]
    fn test_checksum_bits() {
        assert_eq!(WordCount::Twelve.checksum_bits(), 4);
        assert_eq!(WordCount::TwentyFour.checksum_bits(), 8);
    }

    #[test]
    fn test_from_entropy_vector() {
        let mnemonic = WalletMnemonic::from_entropy(&[0u8; 16]).unwrap();
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_12);

        let mnemonic = WalletMnemonic::from_entropy(&[0u8; 32]).unwrap();
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_24);
    }

    #[test]
    fn test_entropy_roundtrip() {
        let entropy = hex::decode("7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f").unwrap();
        let mnemonic = WalletMnemonic::from_entropy(&entropy).unwrap();
        assert_eq!(
            mnemonic.phrase(),
            "legal winner thank year wave sausage worth useful legal winner thank yellow"
        );
        assert_eq!(&*mnemonic.entropy().unwrap(), &entropy);
    }

    #[test]
    fn test_from_entropy_rejects_bad_length() {
        assert!(matches!(
            WalletMnemonic::from_entropy(&[0u8; 17]),
            Err(WalletError::Mnemonic(MnemonicError::InvalidStrength(136)))
        ));
    }

    #[test]
    fn test_from_phrase_normalizes_whitespace() {
        let messy_phrase =
            "  abandon  abandon   abandon abandon abandon abandon abandon abandon abandon abandon abandon about  ";
        let mnemonic = WalletMnemonic::from_phrase(messy_phrase).unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_12);
    }

    #[test]
    fn test_from_phrase_invalid_word_count() {
        let result = WalletMnemonic::from_phrase("abandon abandon abandon");
        assert!(matches!(
            result,
            Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(3)))
        ));
    }

    #[test]
    fn test_from_phrase_invalid_word() {
        let invalid = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon invalid";
        let result = WalletMnemonic::from_phrase(invalid);
        assert_eq!(
            result.unwrap_err(),
            WalletError::Mnemonic(MnemonicError::UnknownWord("invalid".to_string()))
        );
    }

    #[test]
    fn test_from_phrase_bad_checksum() {
        // "abandon" x12 is well-formed but fails the checksum
        let phrase = ["abandon"; 12].join(" ");
        let err = WalletMnemonic::from_phrase(&phrase).unwrap_err();
        assert_eq!(err, WalletError::Mnemonic(MnemonicError::ChecksumFailed));
        assert!(err.is_invalid_mnemonic());
    }

    #[test]
    fn test_to_seed_vector() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed = mnemonic.to_seed("").unwrap();
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_to_seed_with_passphrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed_no_pass = mnemonic.to_seed("").unwrap();
        let seed_with_pass = mnemonic.to_seed("TREZOR").unwrap();

        assert_ne!(seed_no_pass.as_bytes(), seed_with_pass.as_bytes());
        assert_eq!(
            hex::encode(seed_with_pass.as_bytes()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_validate() {
        assert!(WalletMnemonic::validate(TEST_MNEMONIC_12));
        assert!(WalletMnemonic::validate(TEST_MNEMONIC_24));
        assert!(!WalletMnemonic::validate("invalid mnemonic phrase"));
        assert!(!WalletMnemonic::validate("abandon"));
        assert!(!WalletMnemonic::validate(""));
    }

    #[test]
    fn test_is_valid_word() {
        assert!(WalletMnemonic::is_valid_word("abandon"));
        assert!(WalletMnemonic::is_valid_word("zoo"));
        assert!(!WalletMnemonic::is_valid_word("invalidword"));
        assert!(WalletMnemonic::is_valid_word("hello"));
        assert!(!WalletMnemonic::is_valid_word("helloo"));
    }

    #[test]
    fn test_words() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let words = mnemonic.words();
        assert_eq!(words.len(), 12);
        assert_eq!(words[0], "abandon");
        assert_eq!(words[11], "about");
    }

    #[test]
    fn test_word_count_serde() {
        let wc: WordCount = serde_json::from_str("24").unwrap();
        assert_eq!(wc, WordCount::TwentyFour);
        assert_eq!(serde_json::to_string(&WordCount::Fifteen).unwrap(), "15");
        assert!(serde_json::from_str::<WordCount>("13").is_err());
    }

    #[test]
    fn test_debug_does_not_leak_phrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let debug_output = format!("{:?}", mnemonic);

        assert!(!debug_output.contains("abandon"));
        assert!(debug_output.contains("REDACTED"));
        assert!(debug_output.contains("word_count: 12"));
    }

    #[test]
    fn test_unique_generation() {
        let m1 = WalletMnemonic::new().unwrap();
        let m2 = WalletMnemonic::new().unwrap();
        assert_ne!(m1.phrase(), m2.phrase());
    }
}
