//! Login, logout and token resolution
//!
//! Sessions are opaque bearer tokens with a server-side record. Login
//! revokes every prior token of the account before issuing a new one, so
//! one session is active per account at any time. Expiry is lazy: expired
//! rows sit in the store until the owner logs in again and they are swept
//! by that revocation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use crate::application::access::Principal;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::token::AccessToken;
use crate::domain::user::User;
use crate::domain::values::Email;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::crypto::password::verify_password;
use crate::infrastructure::crypto::token::{generate_token, hash_token};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, token_ttl: Duration) -> Self {
        Self { repos, token_ttl }
    }

    // ── Login / logout ──────────────────────────────────────────

    /// Authenticate by email and password. Unknown address, malformed
    /// address, wrong password and deactivated account all fail with the
    /// same `InvalidCredentials`, so the endpoint cannot be used to probe
    /// which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = Email::parse(email).map_err(|_| DomainError::InvalidCredentials)?;

        let user = self
            .repos
            .users()
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if user.is_deleted() || !verify_password(password, &user.password) {
            return Err(DomainError::InvalidCredentials);
        }

        // single active session: out with every prior token first
        self.repos.tokens().delete_all_for_user(user.id).await?;
        let issued = self.issue(&user).await?;

        metrics::counter!("auth_logins_total").increment(1);
        info!(user_id = %user.id, "user logged in");

        Ok(AuthResult {
            token: issued,
            token_type: "Bearer".into(),
            expires_in: self.token_ttl.num_seconds(),
            user,
        })
    }

    /// Revoke one session. Unknown tokens are a no-op so repeated logouts
    /// and logouts of already-rotated tokens succeed.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        self.repos.tokens().delete_by_hash(&hash_token(token)).await
    }

    /// Revoke every session of the token's owner. Returns how many were
    /// revoked.
    pub async fn logout_all(&self, token: &str) -> DomainResult<u64> {
        let record = self.resolve(token).await?;
        let revoked = self.repos.tokens().delete_all_for_user(record.user_id).await?;
        info!(user_id = %record.user_id, revoked, "all sessions revoked");
        Ok(revoked)
    }

    /// Swap the presented token for a fresh one with a full TTL. The old
    /// token dies before the new one is stored.
    pub async fn refresh(&self, token: &str) -> DomainResult<AuthResult> {
        let record = self.resolve(token).await?;
        let user = self
            .repos
            .users()
            .find_by_id(record.user_id)
            .await?
            .filter(|u| !u.is_deleted())
            .ok_or(DomainError::InvalidToken)?;

        self.repos
            .tokens()
            .delete_by_hash(&record.token_hash)
            .await?;
        let issued = self.issue(&user).await?;

        Ok(AuthResult {
            token: issued,
            token_type: "Bearer".into(),
            expires_in: self.token_ttl.num_seconds(),
            user,
        })
    }

    // ── Resolution ──────────────────────────────────────────────

    /// Cheap liveness probe: does this token currently grant access?
    pub async fn validate(&self, token: &str) -> DomainResult<bool> {
        match self.repos.tokens().find_by_hash(&hash_token(token)).await? {
            Some(record) => Ok(!record.is_expired(Utc::now())),
            None => Ok(false),
        }
    }

    /// Resolve a token to the caller it represents. Used by the HTTP
    /// middleware on every authenticated request.
    pub async fn authenticate(&self, token: &str) -> DomainResult<Principal> {
        let record = self.resolve(token).await?;
        let user = self
            .repos
            .users()
            .find_by_id(record.user_id)
            .await?
            .filter(|u| !u.is_deleted())
            .ok_or(DomainError::InvalidToken)?;

        Ok(Principal::new(user.id, user.role, user.company_id))
    }

    /// Full account record behind a token, for the `me` endpoint.
    pub async fn current_user(&self, token: &str) -> DomainResult<User> {
        let record = self.resolve(token).await?;
        self.repos
            .users()
            .find_by_id(record.user_id)
            .await?
            .filter(|u| !u.is_deleted())
            .ok_or(DomainError::InvalidToken)
    }

    // ── Internals ───────────────────────────────────────────────

    async fn resolve(&self, token: &str) -> DomainResult<AccessToken> {
        let record = self
            .repos
            .tokens()
            .find_by_hash(&hash_token(token))
            .await?
            .ok_or(DomainError::InvalidToken)?;
        if record.is_expired(Utc::now()) {
            return Err(DomainError::InvalidToken);
        }
        Ok(record)
    }

    async fn issue(&self, user: &User) -> DomainResult<String> {
        let plaintext = generate_token();
        let record = AccessToken::new(user.id, hash_token(&plaintext), self.token_ttl);
        self.repos.tokens().save(record).await?;
        Ok(plaintext)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, User};
    use crate::domain::values::{CompanyId, Name, PlainPassword, UserId};
    use crate::infrastructure::crypto::password::hash_password;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    const PASSWORD: &str = "sup3r-secret";

    async fn setup() -> (Arc<dyn RepositoryProvider>, AuthService, UserId) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let hashed = hash_password(&PlainPassword::parse(PASSWORD).unwrap()).unwrap();
        let user = repos
            .users()
            .save(User::create(
                Name::parse("Dana Admin").unwrap(),
                Email::parse("dana@acme.test").unwrap(),
                hashed,
                Role::Admin,
                Some(CompanyId::new(1)),
            ))
            .await
            .unwrap();
        let service = AuthService::new(repos.clone(), Duration::hours(24));
        (repos, service, user.id)
    }

    #[tokio::test]
    async fn login_issues_a_bearer_token() {
        let (_repos, service, user_id) = setup().await;
        let auth = service.login("dana@acme.test", PASSWORD).await.unwrap();

        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 24 * 3600);
        assert_eq!(auth.user.id, user_id);
        assert!(service.validate(&auth.token).await.unwrap());
    }

    #[tokio::test]
    async fn second_login_invalidates_the_first_session() {
        let (_repos, service, _) = setup().await;
        let first = service.login("dana@acme.test", PASSWORD).await.unwrap();
        let second = service.login("dana@acme.test", PASSWORD).await.unwrap();

        assert_ne!(first.token, second.token);
        assert!(!service.validate(&first.token).await.unwrap());
        assert!(service.validate(&second.token).await.unwrap());
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let (repos, service, user_id) = setup().await;

        let wrong_password = service.login("dana@acme.test", "not-it").await.unwrap_err();
        let unknown = service.login("ghost@acme.test", PASSWORD).await.unwrap_err();
        let malformed = service.login("not-an-email", PASSWORD).await.unwrap_err();
        assert!(matches!(wrong_password, DomainError::InvalidCredentials));
        assert!(matches!(unknown, DomainError::InvalidCredentials));
        assert!(matches!(malformed, DomainError::InvalidCredentials));

        repos.users().delete(user_id).await.unwrap();
        let deleted = service.login("dana@acme.test", PASSWORD).await.unwrap_err();
        assert!(matches!(deleted, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn refresh_rotates_the_token() {
        let (_repos, service, _) = setup().await;
        let auth = service.login("dana@acme.test", PASSWORD).await.unwrap();
        let refreshed = service.refresh(&auth.token).await.unwrap();

        assert_ne!(auth.token, refreshed.token);
        assert!(!service.validate(&auth.token).await.unwrap());
        assert!(service.validate(&refreshed.token).await.unwrap());

        // the dead token cannot be refreshed again
        let err = service.refresh(&auth.token).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let (_repos, service, _) = setup().await;
        let auth = service.login("dana@acme.test", PASSWORD).await.unwrap();

        service.logout(&auth.token).await.unwrap();
        service.logout(&auth.token).await.unwrap();
        assert!(!service.validate(&auth.token).await.unwrap());
        assert!(!service.validate("saasadm_0000000000000000").await.unwrap());
    }

    #[tokio::test]
    async fn logout_all_counts_revoked_sessions() {
        let (_repos, service, _) = setup().await;
        let auth = service.login("dana@acme.test", PASSWORD).await.unwrap();

        assert_eq!(service.logout_all(&auth.token).await.unwrap(), 1);
        assert!(!service.validate(&auth.token).await.unwrap());
        let err = service.logout_all(&auth.token).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken));
    }

    #[tokio::test]
    async fn authenticate_returns_the_caller_identity() {
        let (repos, service, user_id) = setup().await;
        let auth = service.login("dana@acme.test", PASSWORD).await.unwrap();

        let principal = service.authenticate(&auth.token).await.unwrap();
        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.role, Role::Admin);
        assert_eq!(principal.company_id, Some(CompanyId::new(1)));

        let me = service.current_user(&auth.token).await.unwrap();
        assert_eq!(me.id, user_id);

        // a token outlives its owner only on paper
        repos.users().delete(user_id).await.unwrap();
        let err = service.authenticate(&auth.token).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_tokens_do_not_validate() {
        let (_repos, service, _) = setup().await;
        let short = AuthService::new(service.repos.clone(), Duration::seconds(-1));
        let auth = short.login("dana@acme.test", PASSWORD).await.unwrap();

        assert!(!short.validate(&auth.token).await.unwrap());
        let err = short.authenticate(&auth.token).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken));
    }
}
