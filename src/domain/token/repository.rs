//! Token repository interface

use async_trait::async_trait;

use super::model::AccessToken;
use crate::domain::values::UserId;
use crate::domain::DomainResult;

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<AccessToken>>;
    async fn save(&self, token: AccessToken) -> DomainResult<()>;
    /// Deleting an absent hash is a no-op.
    async fn delete_by_hash(&self, token_hash: &str) -> DomainResult<()>;
    /// Returns how many tokens were removed.
    async fn delete_all_for_user(&self, user_id: UserId) -> DomainResult<u64>;
    async fn count_for_user(&self, user_id: UserId) -> DomainResult<u64>;
}
