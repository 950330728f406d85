pub mod auth;
pub mod companies;
pub mod health;
pub mod metrics;
pub mod plans;
pub mod request_id;
pub mod users;
