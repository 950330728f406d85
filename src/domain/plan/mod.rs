//! Plan aggregate: subscription tiers with pricing and user limits

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{CreatePlanDto, UpdatePlanDto};
pub use model::Plan;
pub use repository::PlanRepository;
