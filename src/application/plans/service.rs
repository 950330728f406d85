//! Plan management service
//!
//! Plans are platform-global, not tenant-scoped, so no tenancy guard runs
//! here; the HTTP layer restricts the whole surface to super-admins.

use std::sync::Arc;

use tracing::info;

use crate::domain::plan::{CreatePlanDto, Plan, UpdatePlanDto};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::values::{MonthlyPrice, PlanId};
use crate::domain::{DomainError, DomainResult};
use crate::shared::types::{PaginatedResult, PaginationParams};

pub struct PlanService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PlanService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create(&self, dto: CreatePlanDto) -> DomainResult<Plan> {
        let plan = Plan::create(dto.name, dto.monthly_price, dto.user_limit, dto.features);
        let plan = self.repos.plans().save(plan).await?;
        info!(plan_id = %plan.id, name = %plan.name, "plan created");
        Ok(plan)
    }

    pub async fn update(&self, id: PlanId, dto: UpdatePlanDto) -> DomainResult<Plan> {
        let mut plan = self.fetch_live(id).await?;

        if let Some(name) = dto.name {
            plan.update_name(name);
        }
        if let Some(price) = dto.monthly_price {
            plan.update_price(price);
        }
        if let Some(limit) = dto.user_limit {
            plan.update_user_limit(limit);
        }
        if let Some(features) = dto.features {
            plan.update_features(features);
        }
        match dto.is_active {
            Some(true) => plan.activate(),
            Some(false) => plan.deactivate(),
            None => {}
        }

        let plan = self.repos.plans().save(plan).await?;
        info!(plan_id = %plan.id, "plan updated");
        Ok(plan)
    }

    /// Soft delete. Companies already subscribed keep their subscription;
    /// the plan only stops being offered.
    pub async fn delete(&self, id: PlanId) -> DomainResult<()> {
        self.fetch_any(id).await?;
        self.repos.plans().delete(id).await?;
        info!(plan_id = %id, "plan deleted");
        Ok(())
    }

    pub async fn restore(&self, id: PlanId) -> DomainResult<Plan> {
        self.fetch_any(id).await?;
        let plan = self.repos.plans().restore(id).await?;
        info!(plan_id = %id, "plan restored");
        Ok(plan)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get(&self, id: PlanId) -> DomainResult<Plan> {
        self.fetch_live(id).await
    }

    pub async fn list(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Plan>> {
        self.repos.plans().find_all(page).await
    }

    pub async fn list_active(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Plan>> {
        self.repos.plans().find_active(page).await
    }

    pub async fn list_deleted(
        &self,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Plan>> {
        self.repos.plans().find_deleted(page).await
    }

    pub async fn search(
        &self,
        query: &str,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Plan>> {
        self.repos.plans().search(query, page).await
    }

    pub async fn price_range(
        &self,
        min: MonthlyPrice,
        max: MonthlyPrice,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Plan>> {
        self.repos.plans().find_by_price_range(min, max, page).await
    }

    // ── Internals ───────────────────────────────────────────────

    async fn fetch_live(&self, id: PlanId) -> DomainResult<Plan> {
        self.repos
            .plans()
            .find_by_id(id)
            .await?
            .filter(|p| !p.is_deleted())
            .ok_or(DomainError::NotFound {
                entity: "Plan",
                field: "id",
                value: id.to_string(),
            })
    }

    async fn fetch_any(&self, id: PlanId) -> DomainResult<Plan> {
        self.repos
            .plans()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Plan",
                field: "id",
                value: id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::{Features, Name, UserLimit};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use rust_decimal::Decimal;

    fn dto(name: &str, cents: i64) -> CreatePlanDto {
        CreatePlanDto {
            name: Name::parse(name).unwrap(),
            monthly_price: MonthlyPrice::new(Decimal::new(cents, 2)).unwrap(),
            user_limit: UserLimit::limited(10).unwrap(),
            features: Features::new(["api", "reports"]).unwrap(),
        }
    }

    fn service() -> PlanService {
        PlanService::new(Arc::new(InMemoryRepositoryProvider::new()))
    }

    #[tokio::test]
    async fn create_then_get() {
        let service = service();
        let plan = service.create(dto("Starter", 1900)).await.unwrap();
        assert!(!plan.id.is_unassigned());

        let fetched = service.get(plan.id).await.unwrap();
        assert_eq!(fetched.name.as_str(), "Starter");
        assert_eq!(fetched.monthly_price.amount(), Decimal::new(1900, 2));
    }

    #[tokio::test]
    async fn update_applies_partial_fields() {
        let service = service();
        let plan = service.create(dto("Starter", 1900)).await.unwrap();

        let updated = service
            .update(
                plan.id,
                UpdatePlanDto {
                    monthly_price: Some(MonthlyPrice::new(Decimal::new(2900, 2)).unwrap()),
                    user_limit: Some(UserLimit::Unlimited),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.monthly_price.amount(), Decimal::new(2900, 2));
        assert!(updated.user_limit.is_unlimited());
        assert!(!updated.is_active);
        // untouched fields survive
        assert_eq!(updated.name.as_str(), "Starter");

        let err = service
            .update(PlanId::new(404), UpdatePlanDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn lifecycle_round_trip_restores_visibility() {
        let service = service();
        let plan = service.create(dto("Starter", 1900)).await.unwrap();

        service.delete(plan.id).await.unwrap();
        assert!(matches!(
            service.get(plan.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            service.delete(plan.id).await.unwrap_err(),
            DomainError::AlreadyInState(_)
        ));
        assert_eq!(service.list(PaginationParams::default()).await.unwrap().total, 0);

        let restored = service.restore(plan.id).await.unwrap();
        assert!(!restored.is_deleted());
        assert_eq!(service.list(PaginationParams::default()).await.unwrap().total, 1);
        assert!(matches!(
            service.restore(plan.id).await.unwrap_err(),
            DomainError::AlreadyInState(_)
        ));
    }

    #[tokio::test]
    async fn listings_filter_by_state_and_price() {
        let service = service();
        let cheap = service.create(dto("Cheap", 900)).await.unwrap();
        let mid = service.create(dto("Mid", 4900)).await.unwrap();
        let _pricey = service.create(dto("Pricey", 19900)).await.unwrap();

        service
            .update(
                mid.id,
                UpdatePlanDto {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(service.list(PaginationParams::default()).await.unwrap().total, 3);
        assert_eq!(
            service.list_active(PaginationParams::default()).await.unwrap().total,
            2
        );

        let ranged = service
            .price_range(
                MonthlyPrice::new(Decimal::new(0, 2)).unwrap(),
                MonthlyPrice::new(Decimal::new(5000, 2)).unwrap(),
                PaginationParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(ranged.total, 2);
        assert!(ranged.items.iter().any(|p| p.id == cheap.id));

        let found = service
            .search("chea", PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].id, cheap.id);
    }
}
