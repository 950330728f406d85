//! Company (tenant) aggregate: model, repository interface, write DTOs

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{CreateCompanyDto, UpdateCompanyDto};
pub use model::Company;
pub use repository::CompanyRepository;
