//! Bearer token generation and hashing
//!
//! Tokens are opaque: a fixed prefix plus 32 hex chars of process
//! randomness. Only the SHA-256 digest is stored, so revoking a session is
//! a row delete and a leaked store reveals no usable credentials.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Token prefix for identification in logs and support tickets
const TOKEN_PREFIX: &str = "saasadm_";

/// Generate a new opaque bearer token. The plaintext is shown to the
/// client exactly once.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 16] = rng.gen();
    format!("{}{}", TOKEN_PREFIX, hex::encode(random_bytes))
}

/// Hash a token for storage using SHA-256
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_carry_prefix_and_entropy() {
        let a = generate_token();
        let b = generate_token();
        assert!(a.starts_with(TOKEN_PREFIX));
        assert_eq!(a.len(), TOKEN_PREFIX.len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn hashing_is_deterministic_hex() {
        let token = generate_token();
        let h1 = hash_token(&token);
        let h2 = hash_token(&token);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
