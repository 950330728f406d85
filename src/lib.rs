//! # SaaS Admin Service
//!
//! Multi-tenant administration backend: companies, subscription plans,
//! per-company users, role-gated access and opaque session tokens.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, value objects and repository traits
//! - **application**: Use-case services, access control and domain events
//! - **infrastructure**: External concerns (storage, password hashing, tokens)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Cross-cutting types, errors and shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export the storage provider for easy access
pub use infrastructure::InMemoryRepositoryProvider;

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export events
pub use application::events::{create_event_bus, spawn_subscription_bootstrap, SharedEventBus};
