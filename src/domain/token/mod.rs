//! Access token aggregate: opaque bearer tokens stored hashed

pub mod model;
pub mod repository;

pub use model::AccessToken;
pub use repository::TokenRepository;
