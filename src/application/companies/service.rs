//! Company management service — application-layer orchestration
//!
//! Signup is the one multi-aggregate use case in the system: company,
//! bootstrap admin and initial subscription. The first two are persisted
//! inline and must both land; the subscription is provisioned by the
//! `CompanyCreated` listener so a slow or failed provisioning never blocks
//! signup.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::access::{
    ensure_same_company_or_super_admin, require_super_admin, Principal,
};
use crate::application::events::{AppEvent, CompanyCreatedEvent, SharedEventBus};
use crate::domain::company::{Company, CreateCompanyDto, UpdateCompanyDto};
use crate::domain::plan::Plan;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::subscription::Subscription;
use crate::domain::user::{Role, User};
use crate::domain::values::{CompanyId, Email, PlanId};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::crypto::password::hash_password;
use crate::shared::types::{PaginatedResult, PaginationParams};

/// What signup hands back: the tenant and its first admin account.
#[derive(Debug, Clone)]
pub struct CreatedCompany {
    pub company: Company,
    pub admin: User,
}

pub struct CompanyService {
    repos: Arc<dyn RepositoryProvider>,
    events: SharedEventBus,
}

impl CompanyService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, events: SharedEventBus) -> Self {
        Self { repos, events }
    }

    // ── Signup ──────────────────────────────────────────────────

    /// Register a company with its bootstrap admin. The admin email is
    /// checked before anything is persisted so a conflict cannot leave an
    /// orphaned company behind. Publishes `CompanyCreated` once both rows
    /// are stored.
    pub async fn create(&self, dto: CreateCompanyDto) -> DomainResult<CreatedCompany> {
        let plan = self.fetch_live_plan(dto.plan_id).await?;
        self.ensure_admin_email_free(&dto.admin_email).await?;

        let company = Company::create(
            dto.name,
            dto.email,
            dto.phone,
            dto.address,
            dto.is_active.unwrap_or(true),
        );
        let company = self.repos.companies().save(company).await?;

        let admin_name = dto.admin_name.unwrap_or_else(|| company.name.clone());
        let hashed = hash_password(&dto.admin_password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        let admin = User::create(
            admin_name,
            dto.admin_email,
            hashed,
            Role::Admin,
            Some(company.id),
        );
        let admin = self.repos.users().save(admin).await?;

        self.events
            .publish(AppEvent::CompanyCreated(CompanyCreatedEvent {
                company_id: company.id,
                plan_id: plan.id,
            }));

        info!(
            company_id = %company.id,
            admin_id = %admin.id,
            plan_id = %plan.id,
            "company registered"
        );
        Ok(CreatedCompany { company, admin })
    }

    // ── Subscription management ─────────────────────────────────

    /// Move the company onto another plan. The current subscription (if
    /// any) is ended at the change instant before the replacement is
    /// stored; between the two writes a reader may briefly see no current
    /// subscription, which admission control treats as admit.
    pub async fn change_plan(
        &self,
        principal: &Principal,
        company_id: CompanyId,
        plan_id: PlanId,
    ) -> DomainResult<Subscription> {
        let company = self.fetch_live(company_id).await?;
        ensure_same_company_or_super_admin(principal, Some(company.id))?;
        let plan = self.fetch_live_plan(plan_id).await?;

        let now = Utc::now();
        if let Some(mut current) = self
            .repos
            .companies()
            .find_active_subscription(company_id)
            .await?
        {
            current.deactivate(now);
            self.repos.companies().save_subscription(current).await?;
        }

        let subscription = self
            .repos
            .companies()
            .save_subscription(Subscription::start(company_id, plan.id, now))
            .await?;

        info!(company_id = %company_id, plan_id = %plan_id, "plan changed");
        Ok(subscription)
    }

    /// Past and present subscriptions of one company, newest last.
    pub async fn subscriptions(
        &self,
        principal: &Principal,
        company_id: CompanyId,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Subscription>> {
        let company = self.fetch_live(company_id).await?;
        ensure_same_company_or_super_admin(principal, Some(company.id))?;
        self.repos
            .companies()
            .find_subscriptions_by_company(company_id, page)
            .await
    }

    // ── CRUD ────────────────────────────────────────────────────

    pub async fn get(&self, principal: &Principal, id: CompanyId) -> DomainResult<Company> {
        let company = self.fetch_live(id).await?;
        ensure_same_company_or_super_admin(principal, Some(company.id))?;
        Ok(company)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: CompanyId,
        dto: UpdateCompanyDto,
    ) -> DomainResult<Company> {
        let mut company = self.fetch_live(id).await?;
        ensure_same_company_or_super_admin(principal, Some(company.id))?;

        if let Some(name) = dto.name {
            company.update_name(name);
        }
        if let Some(email) = dto.email {
            company.update_email(email);
        }
        if let Some(phone) = dto.phone {
            company.update_phone(phone);
        }
        if let Some(address) = dto.address {
            company.update_address(address);
        }
        match dto.is_active {
            Some(true) => company.activate(),
            Some(false) => company.deactivate(),
            None => {}
        }

        let company = self.repos.companies().save(company).await?;
        info!(company_id = %company.id, "company updated");
        Ok(company)
    }

    pub async fn delete(&self, principal: &Principal, id: CompanyId) -> DomainResult<()> {
        let company = self.fetch_any(id).await?;
        ensure_same_company_or_super_admin(principal, Some(company.id))?;
        self.repos.companies().delete(id).await?;
        info!(company_id = %id, "company deleted");
        Ok(())
    }

    pub async fn restore(&self, principal: &Principal, id: CompanyId) -> DomainResult<Company> {
        let company = self.fetch_any(id).await?;
        ensure_same_company_or_super_admin(principal, Some(company.id))?;
        let company = self.repos.companies().restore(id).await?;
        info!(company_id = %id, "company restored");
        Ok(company)
    }

    // ── Cross-tenant listings (super-admin only) ────────────────

    pub async fn list(
        &self,
        principal: &Principal,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Company>> {
        require_super_admin(principal)?;
        self.repos.companies().find_all(page).await
    }

    pub async fn list_active(
        &self,
        principal: &Principal,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Company>> {
        require_super_admin(principal)?;
        self.repos.companies().find_active(page).await
    }

    pub async fn list_deleted(
        &self,
        principal: &Principal,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Company>> {
        require_super_admin(principal)?;
        self.repos.companies().find_deleted(page).await
    }

    pub async fn search(
        &self,
        principal: &Principal,
        query: &str,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Company>> {
        require_super_admin(principal)?;
        self.repos.companies().search(query, page).await
    }

    // ── Internals ───────────────────────────────────────────────

    async fn ensure_admin_email_free(&self, email: &Email) -> DomainResult<()> {
        if let Some(holder) = self.repos.users().find_by_email(email).await? {
            if !holder.is_deleted() {
                return Err(DomainError::Conflict("Email already exists".into()));
            }
        }
        Ok(())
    }

    async fn fetch_live(&self, id: CompanyId) -> DomainResult<Company> {
        self.repos
            .companies()
            .find_by_id(id)
            .await?
            .filter(|c| !c.is_deleted())
            .ok_or(DomainError::NotFound {
                entity: "Company",
                field: "id",
                value: id.to_string(),
            })
    }

    async fn fetch_any(&self, id: CompanyId) -> DomainResult<Company> {
        self.repos
            .companies()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Company",
                field: "id",
                value: id.to_string(),
            })
    }

    async fn fetch_live_plan(&self, id: PlanId) -> DomainResult<Plan> {
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
}

// ── Tests ──────────────────────────────────────────────────────
