pub mod access;
pub mod admission;
pub mod auth;
pub mod companies;
pub mod events;
pub mod plans;
pub mod users;

// Re-export key types for convenience
pub use access::{
    ensure_same_company_or_super_admin, require_admin_level, require_super_admin, Principal,
};
pub use auth::{AuthResult, AuthService};
pub use companies::{CompanyService, CreatedCompany};
pub use events::{create_event_bus, AppEvent, EventBus, EventSubscriber, SharedEventBus};
pub use plans::PlanService;
pub use users::UserService;
