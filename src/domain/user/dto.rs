//! User write-model DTOs
//!
//! Carried between the interface layer and `UserService`, already parsed
//! into value objects so the service never sees raw strings.

use super::model::Role;
use crate::domain::values::{CompanyId, Email, Name, PlainPassword};

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: Name,
    pub email: Email,
    pub password: PlainPassword,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub name: Option<Name>,
    pub email: Option<Email>,
    pub password: Option<PlainPassword>,
    pub role: Option<Role>,
}
