// wallet-core/src/chains/mock.rs
//
// Mock address fallback: dùng khi symbol không được hỗ trợ hoặc derivation lỗi.
// Không có private key; record tạo từ đây luôn có `is_mock = true`.

use rand::RngCore;

pub struct MockAddress;

impl MockAddress {
    /// `0x` + 40 hex chars ngẫu nhiên (không phải key material)
    pub fn generate() -> String {
        let mut bytes = [0u8; 20];
        rand::thread_rng().fill_bytes(&mut bytes);
        format!("0x{}", hex::encode(bytes))
    }

    pub fn is_mock_shaped(address: &str) -> bool {
        address
            .strip_prefix("0x")
            .map(|body| {
                body.len() == 40
                    && body
                        .bytes()
                        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_shape() {
        let address = MockAddress::generate();
        assert_eq!(address.len(), 42);
        assert!(MockAddress::is_mock_shaped(&address));
    }

    #[test]
    fn test_mock_addresses_differ() {
        assert_ne!(MockAddress::generate(), MockAddress::generate());
    }

    #[test]
    fn test_not_mock_shaped() {
        assert!(!MockAddress::is_mock_shaped("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"));
        assert!(!MockAddress::is_mock_shaped("0x123"));
    }
}
