pub mod company;
pub mod lifecycle;
pub mod plan;
pub mod repositories;
pub mod subscription;
pub mod token;
pub mod user;
pub mod values;

// Re-export commonly used types
pub use company::{Company, CompanyRepository};
pub use lifecycle::LifecycleState;
pub use plan::{Plan, PlanRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use subscription::Subscription;
pub use token::{AccessToken, TokenRepository};
pub use user::{Role, User, UserRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
