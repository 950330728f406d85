//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::domain::values::{HashedPassword, PlainPassword};
use crate::shared::errors::InfraError;

/// Hash a password using bcrypt at the default cost.
pub fn hash_password(password: &PlainPassword) -> Result<HashedPassword, InfraError> {
    hash(password.expose(), DEFAULT_COST)
        .map(HashedPassword::from_stored)
        .map_err(|e| InfraError::Crypto(format!("bcrypt hash failed: {}", e)))
}

/// Verify a candidate against a stored hash. A malformed stored hash reads
/// as a failed match, so login cannot tell the cases apart.
pub fn verify_password(candidate: &str, stored: &HashedPassword) -> bool {
    verify(candidate, stored.as_str()).unwrap_or(false)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let plain = PlainPassword::parse("correct horse battery").unwrap();
        let stored = hash_password(&plain).unwrap();
        assert!(verify_password("correct horse battery", &stored));
        assert!(!verify_password("wrong password", &stored));
    }

    #[test]
    fn malformed_stored_hash_fails_closed() {
        let stored = HashedPassword::from_stored("not-a-bcrypt-hash");
        assert!(!verify_password("anything", &stored));
    }
}
