//! Plan user-limit admission control
//!
//! Runs before any user is added to a company. The check walks
//! company -> current subscription -> plan and compares the plan's limit
//! against the company's non-deleted user count. Every broken link in that
//! chain admits: a company with no live subscription, or a subscription
//! pointing at a vanished plan, must never lock out provisioning.

use tracing::{debug, warn};

use crate::domain::repositories::RepositoryProvider;
use crate::domain::values::CompanyId;
use crate::domain::{DomainError, DomainResult};

/// Fails with `AdmissionDenied` when the target company is at its plan's
/// user limit. Admits in every degenerate case.
pub async fn ensure_user_admission(
    repos: &dyn RepositoryProvider,
    company_id: CompanyId,
) -> DomainResult<()> {
    let Some(_company) = repos.companies().find_by_id(company_id).await? else {
        return Ok(());
    };

    let Some(subscription) = repos.companies().find_active_subscription(company_id).await? else {
        return Ok(());
    };

    let Some(plan) = repos.plans().find_by_id(subscription.plan_id).await? else {
        return Ok(());
    };

    if plan.user_limit.is_unlimited() {
        return Ok(());
    }

    let current = repos.users().count_active_by_company_id(company_id).await?;
    if plan.user_limit.can_add(current) {
        debug!(
            company_id = %company_id,
            current,
            limit = %plan.user_limit,
            "user admission granted"
        );
        Ok(())
    } else {
        metrics::counter!("admission_denied_total").increment(1);
        warn!(
            company_id = %company_id,
            current,
            limit = %plan.user_limit,
            "user admission denied"
        );
        Err(DomainError::AdmissionDenied("user limit reached".into()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::Company;
    use crate::domain::plan::Plan;
    use crate::domain::subscription::Subscription;
    use crate::domain::user::{Role, User};
    use crate::domain::values::{
        Address, Email, Features, HashedPassword, MonthlyPrice, Name, Phone, UserLimit,
    };
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::Utc;
    use rust_decimal::Decimal;

    async fn company_with_plan(
        repos: &InMemoryRepositoryProvider,
        limit: UserLimit,
    ) -> CompanyId {
        let plan = repos
            .plans()
            .save(Plan::create(
                Name::parse("Tier").unwrap(),
                MonthlyPrice::new(Decimal::new(900, 2)).unwrap(),
                limit,
                Features::new(["api"]).unwrap(),
            ))
            .await
            .unwrap();
        let company = repos
            .companies()
            .save(Company::create(
                Name::parse("Acme").unwrap(),
                Email::parse("ops@acme.test").unwrap(),
                Phone::parse("+1 202 555 0100").unwrap(),
                Address::parse("1 Main St").unwrap(),
                true,
            ))
            .await
            .unwrap();
        repos
            .companies()
            .save_subscription(Subscription::start(company.id, plan.id, Utc::now()))
            .await
            .unwrap();
        company.id
    }

    async fn add_user(repos: &InMemoryRepositoryProvider, company_id: CompanyId, email: &str) {
        repos
            .users()
            .save(User::create(
                Name::parse("Worker").unwrap(),
                Email::parse(email).unwrap(),
                HashedPassword::from_stored("$2b$12$x"),
                Role::User,
                Some(company_id),
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn denies_at_limit_and_admits_below() {
        let repos = InMemoryRepositoryProvider::new();
        let company_id = company_with_plan(&repos, UserLimit::limited(2).unwrap()).await;

        assert!(ensure_user_admission(&repos, company_id).await.is_ok());
        add_user(&repos, company_id, "one@acme.test").await;
        assert!(ensure_user_admission(&repos, company_id).await.is_ok());
        add_user(&repos, company_id, "two@acme.test").await;

        let err = ensure_user_admission(&repos, company_id).await.unwrap_err();
        assert!(matches!(err, DomainError::AdmissionDenied(_)));
    }

    #[tokio::test]
    async fn deleted_users_free_their_seat() {
        let repos = InMemoryRepositoryProvider::new();
        let company_id = company_with_plan(&repos, UserLimit::limited(1).unwrap()).await;
        add_user(&repos, company_id, "only@acme.test").await;
        assert!(ensure_user_admission(&repos, company_id).await.is_err());

        let seat = repos
            .users()
            .find_by_email(&Email::parse("only@acme.test").unwrap())
            .await
            .unwrap()
            .unwrap();
        repos.users().delete(seat.id).await.unwrap();
        assert!(ensure_user_admission(&repos, company_id).await.is_ok());
    }

    #[tokio::test]
    async fn unlimited_plan_always_admits() {
        let repos = InMemoryRepositoryProvider::new();
        let company_id = company_with_plan(&repos, UserLimit::Unlimited).await;
        for i in 0..10 {
            add_user(&repos, company_id, &format!("u{}@acme.test", i)).await;
        }
        assert!(ensure_user_admission(&repos, company_id).await.is_ok());
    }

    #[tokio::test]
    async fn missing_links_admit() {
        let repos = InMemoryRepositoryProvider::new();

        // company that does not exist
        assert!(ensure_user_admission(&repos, CompanyId::new(999)).await.is_ok());

        // company without any subscription
        let bare = repos
            .companies()
            .save(Company::create(
                Name::parse("Bare").unwrap(),
                Email::parse("ops@bare.test").unwrap(),
                Phone::parse("+1 202 555 0111").unwrap(),
                Address::parse("2 Side St").unwrap(),
                true,
            ))
            .await
            .unwrap();
        assert!(ensure_user_admission(&repos, bare.id).await.is_ok());

        // subscription pointing at a plan id that was never stored
        repos
            .companies()
            .save_subscription(Subscription::start(
                bare.id,
                crate::domain::values::PlanId::new(404),
                Utc::now(),
            ))
            .await
            .unwrap();
        assert!(ensure_user_admission(&repos, bare.id).await.is_ok());
    }
}
