//! Plan repository interface

use async_trait::async_trait;

use super::model::Plan;
use crate::domain::values::{MonthlyPrice, PlanId};
use crate::domain::DomainResult;
use crate::shared::types::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Matches any lifecycle state; reads that must not see deleted
    /// records filter on `is_deleted` themselves.
    async fn find_by_id(&self, id: PlanId) -> DomainResult<Option<Plan>>;
    /// Non-deleted plans.
    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Plan>>;
    /// Non-deleted and `is_active`.
    async fn find_active(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Plan>>;
    async fn find_deleted(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Plan>>;
    /// Case-insensitive substring match on name, non-deleted only.
    async fn search(
        &self,
        query: &str,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Plan>>;
    /// Inclusive monthly-price bounds, non-deleted only.
    async fn find_by_price_range(
        &self,
        min: MonthlyPrice,
        max: MonthlyPrice,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Plan>>;
    /// Assigns an id on first save; returns the stored entity.
    async fn save(&self, plan: Plan) -> DomainResult<Plan>;
    /// Soft delete. Fails `AlreadyInState` when already deleted.
    async fn delete(&self, id: PlanId) -> DomainResult<()>;
    /// Fails `AlreadyInState` when not deleted; returns the restored entity.
    async fn restore(&self, id: PlanId) -> DomainResult<Plan>;
}
