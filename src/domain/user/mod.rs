//! User aggregate: model, repository interface, write DTOs

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{CreateUserDto, UpdateUserDto};
pub use model::{Role, User};
pub use repository::UserRepository;
