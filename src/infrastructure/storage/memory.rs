//! In-memory repository implementations
//!
//! Backs development and tests. DashMap gives per-entry locking and the id
//! counters behave like auto-increment columns, so the store mimics the
//! relational layout without a database. Soft deletes are plain state flips
//! on the stored entity; nothing is ever physically removed except tokens.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::company::{Company, CompanyRepository};
use crate::domain::plan::{Plan, PlanRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::subscription::Subscription;
use crate::domain::token::{AccessToken, TokenRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::values::{CompanyId, Email, MonthlyPrice, PlanId, UserId};
use crate::domain::{DomainError, DomainResult};
use crate::shared::types::{PaginatedResult, PaginationParams};

/// Slice a fully materialized result set down to one page.
fn paginate<T>(items: Vec<T>, page: PaginationParams) -> PaginatedResult<T> {
    let total = items.len() as u64;
    let offset = (page.page.max(1) - 1) as usize * page.limit as usize;
    let items: Vec<T> = items
        .into_iter()
        .skip(offset)
        .take(page.limit as usize)
        .collect();
    PaginatedResult::new(items, total, page.page, page.limit)
}

// ── Users ───────────────────────────────────────────────────────

pub struct InMemoryUserRepository {
    rows: DashMap<i64, User>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Matching rows in id order, the substitute for `ORDER BY id`.
    fn sorted(&self, keep: impl Fn(&User) -> bool) -> Vec<User> {
        let mut items: Vec<User> = self
            .rows
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        items.sort_by_key(|u| u.id.value());
        items
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.rows.get(&id.value()).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let mut matches = self.sorted(|u| u.email == *email);
        // live accounts win over soft-deleted ones holding the same address
        matches.sort_by_key(|u| (u.is_deleted(), u.id.value()));
        Ok(matches.into_iter().next())
    }

    async fn find_by_company_id(
        &self,
        company_id: CompanyId,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>> {
        let items = self.sorted(|u| !u.is_deleted() && u.company_id == Some(company_id));
        Ok(paginate(items, page))
    }

    async fn save(&self, mut user: User) -> DomainResult<User> {
        if user.id.is_unassigned() {
            user.id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.rows.insert(user.id.value(), user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        let mut row = self.rows.get_mut(&id.value()).ok_or(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;
        row.delete()
    }

    async fn restore(&self, id: UserId) -> DomainResult<User> {
        let mut row = self.rows.get_mut(&id.value()).ok_or(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;
        row.restore()?;
        Ok(row.clone())
    }

    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<User>> {
        Ok(paginate(self.sorted(|u| !u.is_deleted()), page))
    }

    async fn find_deleted(&self, page: PaginationParams) -> DomainResult<PaginatedResult<User>> {
        Ok(paginate(self.sorted(|u| u.is_deleted()), page))
    }

    async fn search(
        &self,
        query: &str,
        company: Option<CompanyId>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>> {
        let needle = query.to_lowercase();
        let items = self.sorted(|u| {
            !u.is_deleted()
                && company.map_or(true, |c| u.company_id == Some(c))
                && (u.name.as_str().to_lowercase().contains(&needle)
                    || u.email.as_str().contains(&needle))
        });
        Ok(paginate(items, page))
    }

    async fn count_active_by_company_id(&self, company_id: CompanyId) -> DomainResult<u64> {
        Ok(self
            .rows
            .iter()
            .filter(|r| !r.value().is_deleted() && r.value().company_id == Some(company_id))
            .count() as u64)
    }
}

// ── Companies (+ subscriptions) ─────────────────────────────────

pub struct InMemoryCompanyRepository {
    rows: DashMap<i64, Company>,
    subscriptions: DashMap<i64, Subscription>,
    next_id: AtomicI64,
    next_subscription_id: AtomicI64,
}

impl InMemoryCompanyRepository {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            subscriptions: DashMap::new(),
            next_id: AtomicI64::new(1),
            next_subscription_id: AtomicI64::new(1),
        }
    }

    fn sorted(&self, keep: impl Fn(&Company) -> bool) -> Vec<Company> {
        let mut items: Vec<Company> = self
            .rows
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        items.sort_by_key(|c| c.id.value());
        items
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_by_id(&self, id: CompanyId) -> DomainResult<Option<Company>> {
        Ok(self.rows.get(&id.value()).map(|r| r.value().clone()))
    }

    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Company>> {
        Ok(paginate(self.sorted(|c| !c.is_deleted()), page))
    }

    async fn find_active(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Company>> {
        Ok(paginate(self.sorted(|c| !c.is_deleted() && c.is_active), page))
    }

    async fn find_deleted(
        &self,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Company>> {
        Ok(paginate(self.sorted(|c| c.is_deleted()), page))
    }

    async fn search(
        &self,
        query: &str,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Company>> {
        let needle = query.to_lowercase();
        let items = self.sorted(|c| {
            !c.is_deleted()
                && (c.name.as_str().to_lowercase().contains(&needle)
                    || c.email.as_str().contains(&needle))
        });
        Ok(paginate(items, page))
    }

    async fn save(&self, mut company: Company) -> DomainResult<Company> {
        if company.id.is_unassigned() {
            company.id = CompanyId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.rows.insert(company.id.value(), company.clone());
        Ok(company)
    }

    async fn delete(&self, id: CompanyId) -> DomainResult<()> {
        let mut row = self.rows.get_mut(&id.value()).ok_or(DomainError::NotFound {
            entity: "Company",
            field: "id",
            value: id.to_string(),
        })?;
        row.delete()
    }

    async fn restore(&self, id: CompanyId) -> DomainResult<Company> {
        let mut row = self.rows.get_mut(&id.value()).ok_or(DomainError::NotFound {
            entity: "Company",
            field: "id",
            value: id.to_string(),
        })?;
        row.restore()?;
        Ok(row.clone())
    }

    async fn find_active_subscription(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Option<Subscription>> {
        let now = Utc::now();
        let mut current: Vec<Subscription> = self
            .subscriptions
            .iter()
            .filter(|r| r.value().company_id == company_id && r.value().is_current(now))
            .map(|r| r.value().clone())
            .collect();
        // newest wins if plan changes ever raced and left two current rows
        current.sort_by_key(|s| s.id.value());
        Ok(current.pop())
    }

    async fn find_subscriptions_by_company(
        &self,
        company_id: CompanyId,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Subscription>> {
        let mut items: Vec<Subscription> = self
            .subscriptions
            .iter()
            .filter(|r| r.value().company_id == company_id)
            .map(|r| r.value().clone())
            .collect();
        items.sort_by_key(|s| s.id.value());
        Ok(paginate(items, page))
    }

    async fn save_subscription(&self, mut subscription: Subscription) -> DomainResult<Subscription> {
        if subscription.id.is_unassigned() {
            subscription.id =
                crate::domain::values::SubscriptionId::new(
                    self.next_subscription_id.fetch_add(1, Ordering::SeqCst),
                );
        }
        self.subscriptions
            .insert(subscription.id.value(), subscription.clone());
        Ok(subscription)
    }
}

// ── Plans ───────────────────────────────────────────────────────

pub struct InMemoryPlanRepository {
    rows: DashMap<i64, Plan>,
    next_id: AtomicI64,
}

impl InMemoryPlanRepository {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn sorted(&self, keep: impl Fn(&Plan) -> bool) -> Vec<Plan> {
        let mut items: Vec<Plan> = self
            .rows
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        items.sort_by_key(|p| p.id.value());
        items
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn find_by_id(&self, id: PlanId) -> DomainResult<Option<Plan>> {
        Ok(self.rows.get(&id.value()).map(|r| r.value().clone()))
    }

    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Plan>> {
        Ok(paginate(self.sorted(|p| !p.is_deleted()), page))
    }

    async fn find_active(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Plan>> {
        Ok(paginate(self.sorted(|p| !p.is_deleted() && p.is_active), page))
    }

    async fn find_deleted(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Plan>> {
        Ok(paginate(self.sorted(|p| p.is_deleted()), page))
    }

    async fn search(
        &self,
        query: &str,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Plan>> {
        let needle = query.to_lowercase();
        let items = self.sorted(|p| {
            !p.is_deleted() && p.name.as_str().to_lowercase().contains(&needle)
        });
        Ok(paginate(items, page))
    }

    async fn find_by_price_range(
        &self,
        min: MonthlyPrice,
        max: MonthlyPrice,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Plan>> {
        let items =
            self.sorted(|p| !p.is_deleted() && p.monthly_price >= min && p.monthly_price <= max);
        Ok(paginate(items, page))
    }

    async fn save(&self, mut plan: Plan) -> DomainResult<Plan> {
        if plan.id.is_unassigned() {
            plan.id = PlanId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.rows.insert(plan.id.value(), plan.clone());
        Ok(plan)
    }

    async fn delete(&self, id: PlanId) -> DomainResult<()> {
        let mut row = self.rows.get_mut(&id.value()).ok_or(DomainError::NotFound {
            entity: "Plan",
            field: "id",
            value: id.to_string(),
        })?;
        row.delete()
    }

    async fn restore(&self, id: PlanId) -> DomainResult<Plan> {
        let mut row = self.rows.get_mut(&id.value()).ok_or(DomainError::NotFound {
            entity: "Plan",
            field: "id",
            value: id.to_string(),
        })?;
        row.restore()?;
        Ok(row.clone())
    }
}

// ── Tokens ──────────────────────────────────────────────────────

pub struct InMemoryTokenRepository {
    // keyed by token hash, the only lookup the auth path ever does
    rows: DashMap<String, AccessToken>,
}

impl InMemoryTokenRepository {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
        }
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<AccessToken>> {
        Ok(self.rows.get(token_hash).map(|r| r.value().clone()))
    }

    async fn save(&self, token: AccessToken) -> DomainResult<()> {
        self.rows.insert(token.token_hash.clone(), token);
        Ok(())
    }

    async fn delete_by_hash(&self, token_hash: &str) -> DomainResult<()> {
        self.rows.remove(token_hash);
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> DomainResult<u64> {
        let before = self.rows.len();
        self.rows.retain(|_, t| t.user_id != user_id);
        Ok((before - self.rows.len()) as u64)
    }

    async fn count_for_user(&self, user_id: UserId) -> DomainResult<u64> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.value().user_id == user_id)
            .count() as u64)
    }
}

// ── Provider ────────────────────────────────────────────────────

/// Unified in-memory repository provider.
///
/// ```ignore
/// let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
/// let user = repos.users().find_by_id(UserId::new(1)).await?;
/// ```
pub struct InMemoryRepositoryProvider {
    users: InMemoryUserRepository,
    companies: InMemoryCompanyRepository,
    plans: InMemoryPlanRepository,
    tokens: InMemoryTokenRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            users: InMemoryUserRepository::new(),
            companies: InMemoryCompanyRepository::new(),
            plans: InMemoryPlanRepository::new(),
            tokens: InMemoryTokenRepository::new(),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn companies(&self) -> &dyn CompanyRepository {
        &self.companies
    }

    fn plans(&self) -> &dyn PlanRepository {
        &self.plans
    }

    fn tokens(&self) -> &dyn TokenRepository {
        &self.tokens
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use crate::domain::values::{Features, HashedPassword, Name, UserLimit};
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn user(email: &str) -> User {
        User::create(
            Name::parse("Test User").unwrap(),
            Email::parse(email).unwrap(),
            HashedPassword::from_stored("$2b$12$hash"),
            Role::User,
            Some(CompanyId::new(1)),
        )
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();
        let a = repo.save(user("a@example.com")).await.unwrap();
        let b = repo.save(user("b@example.com")).await.unwrap();
        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);

        // saving an already-assigned entity updates in place
        let again = repo.save(a.clone()).await.unwrap();
        assert_eq!(again.id, a.id);
        assert_eq!(repo.rows.len(), 2);
    }

    #[tokio::test]
    async fn find_by_email_prefers_live_account() {
        let repo = InMemoryUserRepository::new();
        let old = repo.save(user("dup@example.com")).await.unwrap();
        repo.delete(old.id).await.unwrap();
        let live = repo.save(user("dup@example.com")).await.unwrap();

        let found = repo
            .find_by_email(&Email::parse("dup@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, live.id);
        assert!(!found.is_deleted());
    }

    #[tokio::test]
    async fn soft_delete_hides_from_listings_only() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(user("gone@example.com")).await.unwrap();
        repo.delete(saved.id).await.unwrap();

        let all = repo.find_all(PaginationParams::default()).await.unwrap();
        assert!(all.items.is_empty());
        let deleted = repo
            .find_deleted(PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(deleted.items.len(), 1);
        // still reachable by id for restore flows
        assert!(repo.find_by_id(saved.id).await.unwrap().is_some());

        let err = repo.delete(saved.id).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyInState(_)));

        let restored = repo.restore(saved.id).await.unwrap();
        assert!(!restored.is_deleted());
    }

    #[tokio::test]
    async fn pagination_slices_and_counts() {
        let repo = InMemoryUserRepository::new();
        for i in 0..5 {
            repo.save(user(&format!("u{}@example.com", i))).await.unwrap();
        }
        let page = repo
            .find_all(PaginationParams { page: 2, limit: 2 })
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id.value(), 3);
    }

    #[tokio::test]
    async fn active_subscription_is_the_current_one() {
        let repo = InMemoryCompanyRepository::new();
        let company = CompanyId::new(7);
        let now = Utc::now();

        let mut old = Subscription::start(company, PlanId::new(1), now - Duration::days(40));
        old.deactivate(now - Duration::days(10));
        repo.save_subscription(old).await.unwrap();
        let current = repo
            .save_subscription(Subscription::start(company, PlanId::new(2), now))
            .await
            .unwrap();

        let found = repo.find_active_subscription(company).await.unwrap().unwrap();
        assert_eq!(found.id, current.id);
        assert_eq!(found.plan_id, PlanId::new(2));

        let history = repo
            .find_subscriptions_by_company(company, PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(history.total, 2);
    }

    #[tokio::test]
    async fn price_range_is_inclusive() {
        let repo = InMemoryPlanRepository::new();
        for (name, cents) in [("Free", 0), ("Basic", 1000), ("Pro", 5000)] {
            repo.save(Plan::create(
                Name::parse(name).unwrap(),
                MonthlyPrice::new(Decimal::new(cents, 2)).unwrap(),
                UserLimit::Unlimited,
                Features::new(["api"]).unwrap(),
            ))
            .await
            .unwrap();
        }

        let hits = repo
            .find_by_price_range(
                MonthlyPrice::new(Decimal::new(0, 2)).unwrap(),
                MonthlyPrice::new(Decimal::new(1000, 2)).unwrap(),
                PaginationParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(hits.total, 2);
    }

    #[tokio::test]
    async fn token_store_round_trip() {
        let repo = InMemoryTokenRepository::new();
        let user_id = UserId::new(9);
        repo.save(AccessToken::new(user_id, "h1".into(), Duration::hours(1)))
            .await
            .unwrap();
        repo.save(AccessToken::new(user_id, "h2".into(), Duration::hours(1)))
            .await
            .unwrap();

        assert!(repo.find_by_hash("h1").await.unwrap().is_some());
        assert_eq!(repo.count_for_user(user_id).await.unwrap(), 2);

        repo.delete_by_hash("h1").await.unwrap();
        repo.delete_by_hash("h1").await.unwrap(); // idempotent
        assert_eq!(repo.count_for_user(user_id).await.unwrap(), 1);

        assert_eq!(repo.delete_all_for_user(user_id).await.unwrap(), 1);
        assert_eq!(repo.count_for_user(user_id).await.unwrap(), 0);
    }
}
