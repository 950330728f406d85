//! Plan management use-cases

mod service;

pub use service::PlanService;
