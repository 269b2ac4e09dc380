//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore, rngs::OsRng};

/// Size of a session token before encoding (128 bits)
pub const TOKEN_BYTES: usize = 16;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate an opaque, URL and cookie safe token from [`TOKEN_BYTES`] random bytes
pub fn random_token() -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(random_bytes(TOKEN_BYTES))
}

/// Generate a random string of ASCII letters and digits
pub fn random_alphanumeric(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_token_shape() {
        let token = random_token();
        // 16 bytes -> 22 base64 characters without padding
        assert_eq!(token.len(), 22);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_random_tokens_are_unique() {
        let tokens: HashSet<String> = (0..1000).map(|_| random_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_random_alphanumeric() {
        let value = random_alphanumeric(24);
        assert_eq!(value.len(), 24);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
