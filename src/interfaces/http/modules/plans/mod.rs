//! Subscription plan API module

pub mod dto;
pub mod handlers;

pub use handlers::PlanHandlerState;
