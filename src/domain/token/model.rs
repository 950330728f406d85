//! Access token records
//!
//! Only the SHA-256 digest of a token is stored. The plaintext exists for
//! the lifetime of the issuing call and is never recoverable afterwards,
//! which is what makes revocation a plain row delete.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::values::UserId;

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub id: String,
    pub user_id: UserId,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(user_id: UserId, token_hash: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Expiry is lazy: nothing sweeps the store, callers check on use.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

// ── Tests ──────────────────────────────────────────────────────
