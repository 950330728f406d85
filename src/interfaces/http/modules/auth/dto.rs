//! Session DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::AuthResult;
use crate::domain::user::User;

/// Login request
///
/// Deliberately not `Validate`-derived: a malformed email must come back as
/// 401 like any other bad credential, never as a 422 that confirms the
/// address format was the only problem.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Compact account representation used by session endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified_at: Option<DateTime<Utc>>,
}

impl From<User> for AccountInfo {
    fn from(u: User) -> Self {
        Self {
            id: u.id.value(),
            name: u.name.as_str().to_string(),
            email: u.email.as_str().to_string(),
            role: u.role.as_str().to_string(),
            company_id: u.company_id.map(|c| c.value()),
            email_verified_at: u.email_verified_at,
        }
    }
}

/// Issued session: the token plaintext appears here exactly once
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: AccountInfo,
}

impl From<AuthResult> for SessionResponse {
    fn from(auth: AuthResult) -> Self {
        Self {
            token: auth.token,
            token_type: auth.token_type,
            expires_in: auth.expires_in,
            user: AccountInfo::from(auth.user),
        }
    }
}

/// Result of revoking every session of an account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevokedSessions {
    pub revoked: u64,
}
