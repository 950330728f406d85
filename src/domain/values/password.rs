//! Password value objects
//!
//! Two distinct types make the hashed/plaintext distinction a compile-time
//! fact: `PlainPassword` only ever exists in memory on the way into the
//! hasher, `HashedPassword` is what aggregates and stores carry. The one-way
//! conversion lives in `infrastructure::crypto::password`.

use std::fmt;

use crate::shared::errors::DomainError;

/// A raw password as submitted by a caller. Never persisted.
#[derive(Clone)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub const MIN_LEN: usize = 8;
    pub const MAX_LEN: usize = 255;

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let chars = raw.chars().count();
        if chars < Self::MIN_LEN {
            return Err(DomainError::Validation(format!(
                "password must be at least {} characters",
                Self::MIN_LEN
            )));
        }
        if chars > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "password cannot exceed {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// Access the raw secret. Callers are expected to hand it straight to
    /// the hasher or verifier.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Keeps raw passwords out of debug output and logs.
impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(***)")
    }
}

/// A bcrypt digest. Constructed by the crypto layer or rehydrated from
/// storage; the plaintext is unrecoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
