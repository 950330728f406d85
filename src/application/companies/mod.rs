//! Company management use-cases

mod service;

pub use service::{CompanyService, CreatedCompany};
