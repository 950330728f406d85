//! HTTP REST API interfaces
//!
//! - `middleware`: bearer-token authentication and role gates
//! - `common`: response envelopes and the validating JSON extractor
//! - `modules`: one directory per feature (handlers + DTOs)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
