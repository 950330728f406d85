//! Subscription aggregate

pub mod model;

pub use model::Subscription;
