//! User management service — application-layer orchestration
//!
//! All user-related business logic lives here. HTTP handlers are thin
//! wrappers that resolve the caller and delegate. Reads and writes that
//! take a `Principal` apply the tenancy guard before touching anything;
//! `create` is the exception because company signup bootstraps its first
//! admin through the same path, so its guard sits with the caller.

use std::sync::Arc;

use tracing::info;

use crate::application::access::{ensure_same_company_or_super_admin, Principal};
use crate::application::admission::ensure_user_admission;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::{CreateUserDto, Role, UpdateUserDto, User};
use crate::domain::values::{CompanyId, Email, UserId};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::crypto::password::hash_password;
use crate::shared::types::{PaginatedResult, PaginationParams};

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Create a user. A live account already holding the email is a
    /// conflict; a soft-deleted holder is not. Company-scoped users pass
    /// admission control first.
    pub async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        self.ensure_email_free(&dto.email, None).await?;

        if let Some(company_id) = dto.company_id {
            ensure_user_admission(self.repos.as_ref(), company_id).await?;
        }

        let hashed = hash_password(&dto.password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        let user = User::create(dto.name, dto.email, hashed, dto.role, dto.company_id);
        let user = self.repos.users().save(user).await?;

        info!(user_id = %user.id, role = %user.role, "user created");
        Ok(user)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: UserId,
        dto: UpdateUserDto,
    ) -> DomainResult<User> {
        let mut user = self.fetch_live(id).await?;
        ensure_same_company_or_super_admin(principal, user.company_id)?;

        if let Some(name) = dto.name {
            user.update_name(name);
        }
        // unchanged addresses are a no-op so verification is not reset
        if let Some(email) = dto.email {
            if email != user.email {
                self.ensure_email_free(&email, Some(id)).await?;
                user.update_email(email);
            }
        }
        if let Some(password) = dto.password {
            let hashed = hash_password(&password)
                .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
            user.update_password(hashed);
        }
        if let Some(role) = dto.role {
            user = user.assign_role(role);
        }

        let user = self.repos.users().save(user).await?;
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    /// Soft delete. Deleting twice surfaces `AlreadyInState`, so the guard
    /// runs against the record in whatever state it is in.
    pub async fn delete(&self, principal: &Principal, id: UserId) -> DomainResult<()> {
        let user = self.fetch_any(id).await?;
        ensure_same_company_or_super_admin(principal, user.company_id)?;
        self.repos.users().delete(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    pub async fn restore(&self, principal: &Principal, id: UserId) -> DomainResult<User> {
        let user = self.fetch_any(id).await?;
        ensure_same_company_or_super_admin(principal, user.company_id)?;
        let user = self.repos.users().restore(id).await?;
        info!(user_id = %id, "user restored");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get(&self, principal: &Principal, id: UserId) -> DomainResult<User> {
        let user = self.fetch_live(id).await?;
        ensure_same_company_or_super_admin(principal, user.company_id)?;
        Ok(user)
    }

    /// Super-admins list everyone; admins get their own company,
    /// pre-filtered at the store so page counts stay honest.
    pub async fn list(
        &self,
        principal: &Principal,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>> {
        match principal.role {
            Role::SuperAdmin => self.repos.users().find_all(page).await,
            Role::Admin => {
                let company_id = self.own_company(principal)?;
                self.repos.users().find_by_company_id(company_id, page).await
            }
            Role::User => Err(DomainError::Forbidden("admin access required".into())),
        }
    }

    pub async fn search(
        &self,
        principal: &Principal,
        query: &str,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>> {
        match principal.role {
            Role::SuperAdmin => self.repos.users().search(query, None, page).await,
            Role::Admin => {
                let company_id = self.own_company(principal)?;
                self.repos
                    .users()
                    .search(query, Some(company_id), page)
                    .await
            }
            Role::User => Err(DomainError::Forbidden("admin access required".into())),
        }
    }

    // ── Internals ───────────────────────────────────────────────

    /// `Conflict` when a live account other than `exclude` holds the email.
    async fn ensure_email_free(&self, email: &Email, exclude: Option<UserId>) -> DomainResult<()> {
        if let Some(holder) = self.repos.users().find_by_email(email).await? {
            if !holder.is_deleted() && Some(holder.id) != exclude {
                return Err(DomainError::Conflict("Email already exists".into()));
            }
        }
        Ok(())
    }

    async fn fetch_live(&self, id: UserId) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .filter(|u| !u.is_deleted())
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })
    }

    async fn fetch_any(&self, id: UserId) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })
    }

    fn own_company(&self, principal: &Principal) -> DomainResult<CompanyId> {
        principal
            .company_id
            .ok_or_else(|| DomainError::Forbidden("cross-company access".into()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::{CompanyId, HashedPassword, Name, PlainPassword};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn create_dto(email: &str, company: Option<i64>) -> CreateUserDto {
        CreateUserDto {
            name: Name::parse("New Person").unwrap(),
            email: Email::parse(email).unwrap(),
            password: PlainPassword::parse("longenough").unwrap(),
            role: Role::User,
            company_id: company.map(CompanyId::new),
        }
    }

    /// Seed a user without paying the bcrypt cost.
    async fn seed(
        repos: &Arc<dyn RepositoryProvider>,
        email: &str,
        role: Role,
        company: Option<i64>,
    ) -> User {
        repos
            .users()
            .save(User::create(
                Name::parse("Seeded").unwrap(),
                Email::parse(email).unwrap(),
                HashedPassword::from_stored("$2b$12$seed"),
                role,
                company.map(CompanyId::new),
            ))
            .await
            .unwrap()
    }

    fn admin_of(company: i64) -> Principal {
        Principal::new(UserId::new(999), Role::Admin, Some(CompanyId::new(company)))
    }

    fn super_admin() -> Principal {
        Principal::new(UserId::new(998), Role::SuperAdmin, None)
    }

    async fn setup() -> (Arc<dyn RepositoryProvider>, UserService) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let service = UserService::new(repos.clone());
        (repos, service)
    }

    #[tokio::test]
    async fn create_persists_with_hashed_password() {
        let (_repos, service) = setup().await;
        let user = service.create(create_dto("p@acme.test", Some(1))).await.unwrap();

        assert!(!user.id.is_unassigned());
        assert_ne!(user.password.as_str(), "longenough");
        assert!(user.password.as_str().starts_with("$2"));
    }

    #[tokio::test]
    async fn create_rejects_live_email_holder_only() {
        let (repos, service) = setup().await;
        let existing = seed(&repos, "taken@acme.test", Role::User, Some(1)).await;

        let err = service
            .create(create_dto("taken@acme.test", Some(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // the address frees up once its holder is soft-deleted
        repos.users().delete(existing.id).await.unwrap();
        assert!(service.create(create_dto("taken@acme.test", Some(1))).await.is_ok());
    }

    #[tokio::test]
    async fn get_applies_the_tenancy_guard() {
        let (repos, service) = setup().await;
        let ours = seed(&repos, "a@one.test", Role::User, Some(1)).await;
        let theirs = seed(&repos, "b@two.test", Role::User, Some(2)).await;
        let unscoped = seed(&repos, "root@hq.test", Role::SuperAdmin, None).await;

        let admin = admin_of(1);
        assert!(service.get(&admin, ours.id).await.is_ok());
        assert!(matches!(
            service.get(&admin, theirs.id).await.unwrap_err(),
            DomainError::Forbidden(_)
        ));
        assert!(matches!(
            service.get(&admin, unscoped.id).await.unwrap_err(),
            DomainError::Forbidden(_)
        ));

        assert!(service.get(&super_admin(), theirs.id).await.is_ok());
        assert!(service.get(&super_admin(), unscoped.id).await.is_ok());
    }

    #[tokio::test]
    async fn deleted_users_read_as_not_found() {
        let (repos, service) = setup().await;
        let user = seed(&repos, "gone@one.test", Role::User, Some(1)).await;
        repos.users().delete(user.id).await.unwrap();

        let err = service.get(&super_admin(), user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_changes_fields_and_rechecks_email() {
        let (repos, service) = setup().await;
        let user = seed(&repos, "orig@one.test", Role::User, Some(1)).await;
        seed(&repos, "other@one.test", Role::User, Some(1)).await;

        let updated = service
            .update(
                &admin_of(1),
                user.id,
                UpdateUserDto {
                    name: Some(Name::parse("Renamed").unwrap()),
                    email: Some(Email::parse("fresh@one.test").unwrap()),
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_str(), "Renamed");
        assert_eq!(updated.email.as_str(), "fresh@one.test");
        assert_eq!(updated.role, Role::Admin);
        // a changed address starts unverified again
        assert!(updated.email_verified_at.is_none());

        let err = service
            .update(
                &admin_of(1),
                user.id,
                UpdateUserDto {
                    email: Some(Email::parse("other@one.test").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // re-submitting the current address is not a conflict with self
        assert!(service
            .update(
                &admin_of(1),
                user.id,
                UpdateUserDto {
                    email: Some(Email::parse("fresh@one.test").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn delete_restore_lifecycle() {
        let (repos, service) = setup().await;
        let user = seed(&repos, "cycle@one.test", Role::User, Some(1)).await;
        let admin = admin_of(1);

        service.delete(&admin, user.id).await.unwrap();
        let err = service.delete(&admin, user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyInState(_)));

        let restored = service.restore(&admin, user.id).await.unwrap();
        assert!(!restored.is_deleted());
        let err = service.restore(&admin, user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyInState(_)));

        // cross-company admins cannot touch the lifecycle either
        service.delete(&admin, user.id).await.unwrap();
        let err = service.restore(&admin_of(2), user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn listing_is_scoped_per_role() {
        let (repos, service) = setup().await;
        seed(&repos, "a1@one.test", Role::User, Some(1)).await;
        seed(&repos, "a2@one.test", Role::User, Some(1)).await;
        seed(&repos, "b1@two.test", Role::User, Some(2)).await;

        let everyone = service
            .list(&super_admin(), PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(everyone.total, 3);

        let scoped = service
            .list(&admin_of(1), PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(scoped.total, 2);
        assert!(scoped
            .items
            .iter()
            .all(|u| u.company_id == Some(CompanyId::new(1))));

        let plain = Principal::new(UserId::new(5), Role::User, Some(CompanyId::new(1)));
        assert!(matches!(
            service.list(&plain, PaginationParams::default()).await.unwrap_err(),
            DomainError::Forbidden(_)
        ));
    }

    #[tokio::test]
    async fn search_is_scoped_per_role() {
        let (repos, service) = setup().await;
        seed(&repos, "match@one.test", Role::User, Some(1)).await;
        seed(&repos, "match@two.test", Role::User, Some(2)).await;

        let all = service
            .search(&super_admin(), "match", PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(all.total, 2);

        let scoped = service
            .search(&admin_of(1), "match", PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(scoped.total, 1);
        assert_eq!(scoped.items[0].company_id, Some(CompanyId::new(1)));
    }
}
