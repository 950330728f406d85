//! Company repository interface
//!
//! Subscription records belong to the company aggregate, so their
//! persistence hangs off this trait instead of a separate one.

use async_trait::async_trait;

use super::model::Company;
use crate::domain::subscription::Subscription;
use crate::domain::values::CompanyId;
use crate::domain::DomainResult;
use crate::shared::types::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Matches any lifecycle state; reads that must not see deleted
    /// records filter on `is_deleted` themselves.
    async fn find_by_id(&self, id: CompanyId) -> DomainResult<Option<Company>>;
    /// Non-deleted companies.
    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Company>>;
    /// Non-deleted and `is_active`.
    async fn find_active(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Company>>;
    async fn find_deleted(&self, page: PaginationParams)
        -> DomainResult<PaginatedResult<Company>>;
    /// Case-insensitive substring match on name and email, non-deleted only.
    async fn search(
        &self,
        query: &str,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Company>>;
    /// Assigns an id on first save; returns the stored entity.
    async fn save(&self, company: Company) -> DomainResult<Company>;
    /// Soft delete. Fails `AlreadyInState` when already deleted.
    async fn delete(&self, id: CompanyId) -> DomainResult<()>;
    /// Fails `AlreadyInState` when not deleted; returns the restored entity.
    async fn restore(&self, id: CompanyId) -> DomainResult<Company>;

    async fn find_active_subscription(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Option<Subscription>>;
    async fn find_subscriptions_by_company(
        &self,
        company_id: CompanyId,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Subscription>>;
    async fn save_subscription(&self, subscription: Subscription) -> DomainResult<Subscription>;
}
