//! User repository interface

use async_trait::async_trait;

use super::model::User;
use crate::domain::values::{CompanyId, Email, UserId};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Matches any lifecycle state; reads that must not see deleted
    /// records filter on `is_deleted` themselves.
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Matches any lifecycle state, preferring a non-deleted match. Login
    /// has to see deactivated accounts, so no filter is applied here;
    /// callers that care check `is_deleted` themselves.
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    /// Non-deleted users of one company.
    async fn find_by_company_id(
        &self,
        company_id: CompanyId,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>>;

    /// Assigns an id on first save; returns the stored entity.
    async fn save(&self, user: User) -> DomainResult<User>;

    /// Soft delete. Fails `AlreadyInState` when already deleted.
    async fn delete(&self, id: UserId) -> DomainResult<()>;

    /// Fails `AlreadyInState` when not deleted; returns the restored entity.
    async fn restore(&self, id: UserId) -> DomainResult<User>;

    /// Non-deleted users.
    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<User>>;

    async fn find_deleted(&self, page: PaginationParams) -> DomainResult<PaginatedResult<User>>;

    /// Case-insensitive substring match on name and email, non-deleted
    /// only, optionally scoped to one company.
    async fn search(
        &self,
        query: &str,
        company: Option<CompanyId>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>>;

    /// Non-deleted user count for a company; the admission-control input.
    async fn count_active_by_company_id(&self, company_id: CompanyId) -> DomainResult<u64>;
}
