//! Property-based tests for mnemonic handling and wallet derivation
//!
//! Uses proptest to check determinism and checksum sensitivity across many inputs.

use custody_wallet_core::chains::{BitcoinAddress, EvmAddress};
use custody_wallet_core::crypto::{mnemonic_to_seed, WalletMnemonic, WordCount};
use custody_wallet_core::wallet::WalletGenerator;
use custody_wallet_core::{Chain, Network};
use proptest::prelude::*;

fn entropy_strategy() -> impl Strategy<Value = Vec<u8>> {
    (prop::sample::select(vec![16usize, 20, 24, 28, 32]), any::<[u8; 32]>())
        .prop_map(|(len, bytes)| bytes[..len].to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))] // PBKDF2 (2048 rounds) per case

    /// Property: word count = (strength + strength/32) / 11
    #[test]
    fn prop_word_count_matches_strength(entropy in entropy_strategy()) {
        let mnemonic = WalletMnemonic::from_entropy(&entropy).unwrap();
        let strength = entropy.len() * 8;
        prop_assert_eq!(mnemonic.word_count(), (strength + strength / 32) / 11);
        prop_assert_eq!(mnemonic.strength_bits(), strength);
        let recovered = mnemonic.entropy().unwrap();
        prop_assert_eq!(&recovered[..], &entropy[..]);
        prop_assert!(WordCount::from_strength(strength).is_ok());
    }

    /// Property: seed derivation is a pure function of (phrase, passphrase)
    #[test]
    fn prop_seed_determinism(entropy in entropy_strategy(), passphrase in "[a-zA-Z0-9]{0,12}") {
        let mnemonic = WalletMnemonic::from_entropy(&entropy).unwrap();
        let seed1 = mnemonic_to_seed(mnemonic.phrase(), &passphrase).unwrap();
        let seed2 = mnemonic_to_seed(mnemonic.phrase(), &passphrase).unwrap();
        prop_assert_eq!(seed1.as_bytes(), seed2.as_bytes());

        let other = mnemonic_to_seed(mnemonic.phrase(), &format!("{}!", passphrase)).unwrap();
        prop_assert_ne!(seed1.as_bytes(), other.as_bytes());
    }

    /// Property: restoring from the phrase reproduces {address, privateKey}
    #[test]
    fn prop_restore_round_trip(entropy in entropy_strategy(), index in 0u32..8) {
        let generator = WalletGenerator::default();
        let mnemonic = WalletMnemonic::from_entropy(&entropy).unwrap();

        for chain in Chain::ALL {
            let generated = generator.derive_wallet(chain, &mnemonic, index).unwrap();
            let restored = generator
                .restore_wallet_at_path(chain, mnemonic.phrase(), &generated.derivation_path)
                .unwrap();
            prop_assert_eq!(&generated.address, &restored.address);
            prop_assert_eq!(&*generated.private_key, &*restored.private_key);
        }
    }

    /// Property: changing one character of one word never restores the same wallet
    #[test]
    fn prop_single_character_mutation(
        entropy in any::<[u8; 16]>(),
        word_idx in 0usize..12,
        char_pos in 0usize..8,
        replacement in b'a'..=b'z',
    ) {
        let generator = WalletGenerator::default();
        let mnemonic = WalletMnemonic::from_entropy(&entropy).unwrap();
        let original = generator.restore_btc_wallet(mnemonic.phrase()).unwrap();

        let mut words: Vec<String> = mnemonic.words().iter().map(|w| w.to_string()).collect();
        let mut bytes = words[word_idx].clone().into_bytes();
        let pos = char_pos % bytes.len();
        prop_assume!(bytes[pos] != replacement);
        bytes[pos] = replacement;
        words[word_idx] = String::from_utf8(bytes).unwrap();
        let mutated = words.join(" ");

        match generator.restore_btc_wallet(&mutated) {
            Err(e) => prop_assert!(e.is_invalid_mnemonic()),
            Ok(wallet) => prop_assert_ne!(wallet.address, original.address),
        }
    }

    /// Property: EVM addresses pass their own EIP-55 check; any case flip fails it
    #[test]
    fn prop_eip55_self_check(entropy in any::<[u8; 16]>(), flip in 2usize..42) {
        let generator = WalletGenerator::default();
        let mnemonic = WalletMnemonic::from_entropy(&entropy).unwrap();
        let wallet = generator.derive_wallet(Chain::Eth, &mnemonic, 0).unwrap();

        prop_assert!(EvmAddress::is_valid_checksum(&wallet.address));
        prop_assert!(EvmAddress::is_valid(&wallet.address.to_lowercase()));

        let mut chars: Vec<char> = wallet.address.chars().collect();
        prop_assume!(chars[flip].is_ascii_alphabetic());
        chars[flip] = if chars[flip].is_ascii_uppercase() {
            chars[flip].to_ascii_lowercase()
        } else {
            chars[flip].to_ascii_uppercase()
        };
        let flipped: String = chars.into_iter().collect();
        prop_assert!(!EvmAddress::is_valid_checksum(&flipped));
    }

    /// Property: Base58Check version byte follows the configured network
    #[test]
    fn prop_btc_version_byte(entropy in any::<[u8; 16]>()) {
        let mnemonic = WalletMnemonic::from_entropy(&entropy).unwrap();
        let wallet = WalletGenerator::default()
            .derive_wallet(Chain::Btc, &mnemonic, 0)
            .unwrap();

        prop_assert!(wallet.address.starts_with('1'));
        let (network, _) = BitcoinAddress::decode_p2pkh(&wallet.address).unwrap();
        prop_assert_eq!(network, Network::Mainnet);
        let wif = BitcoinAddress::decode_wif(&wallet.private_key).unwrap();
        prop_assert_eq!(wif.network, Network::Mainnet);
        prop_assert!(wif.compressed);
    }
}
