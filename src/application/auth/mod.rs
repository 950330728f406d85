//! Authentication and session use-cases

mod service;

pub use service::{AuthResult, AuthService};
