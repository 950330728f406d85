//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::company::CompanyRepository;
use super::plan::PlanRepository;
use super::token::TokenRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Services hold one `Arc<dyn RepositoryProvider>` and request only the
/// repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_id(UserId::new(1)).await?;
///     let sub = repos.companies().find_active_subscription(user.company_id.unwrap()).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn companies(&self) -> &dyn CompanyRepository;
    fn plans(&self) -> &dyn PlanRepository;
    fn tokens(&self) -> &dyn TokenRepository;
}
