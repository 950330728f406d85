//! Session endpoints: login, logout, refresh, current account

pub mod dto;
pub mod handlers;

pub use handlers::AuthHandlerState;
