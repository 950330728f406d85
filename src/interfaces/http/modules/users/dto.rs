//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::user::{CreateUserDto, UpdateUserDto, User};
use crate::domain::values::{CompanyId, Email, Name, PlainPassword};
use crate::domain::DomainResult;

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id.value(),
            name: u.name.as_str().to_string(),
            email: u.email.as_str().to_string(),
            role: u.role.as_str().to_string(),
            company_id: u.company_id.map(|c| c.value()),
            email_verified_at: u.email_verified_at,
            is_deleted: u.is_deleted(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 255))]
    pub password: String,
    /// `super-admin`, `admin` or `user`. Default: `user`
    #[serde(default = "default_role")]
    pub role: String,
    pub company_id: Option<i64>,
}

fn default_role() -> String {
    "user".to_string()
}

impl CreateUserRequest {
    pub fn into_domain(self) -> DomainResult<CreateUserDto> {
        Ok(CreateUserDto {
            name: Name::parse(&self.name)?,
            email: Email::parse(&self.email)?,
            password: PlainPassword::parse(&self.password)?,
            role: self.role.parse()?,
            company_id: self.company_id.map(CompanyId::new),
        })
    }
}

/// Update user request; omitted fields stay untouched
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 255))]
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_domain(self) -> DomainResult<UpdateUserDto> {
        Ok(UpdateUserDto {
            name: self.name.as_deref().map(Name::parse).transpose()?,
            email: self.email.as_deref().map(Email::parse).transpose()?,
            password: self
                .password
                .as_deref()
                .map(PlainPassword::parse)
                .transpose()?,
            role: self.role.as_deref().map(str::parse).transpose()?,
        })
    }
}

/// List users query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Substring match on name or email
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use crate::domain::DomainError;

    #[test]
    fn create_request_parses_into_value_objects() {
        let request = CreateUserRequest {
            name: "  Jamie Park  ".into(),
            email: "Jamie@Acme.IO".into(),
            password: "longenough".into(),
            role: "admin".into(),
            company_id: Some(7),
        };
        let dto = request.into_domain().unwrap();
        assert_eq!(dto.name.as_str(), "Jamie Park");
        assert_eq!(dto.email.as_str(), "jamie@acme.io");
        assert_eq!(dto.role, Role::Admin);
        assert_eq!(dto.company_id, Some(CompanyId::new(7)));
    }

    #[test]
    fn unknown_role_is_a_validation_error() {
        let request = CreateUserRequest {
            name: "Jamie Park".into(),
            email: "jamie@acme.io".into(),
            password: "longenough".into(),
            role: "owner".into(),
            company_id: None,
        };
        assert!(matches!(
            request.into_domain().unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn empty_update_stays_empty() {
        let request = UpdateUserRequest {
            name: None,
            email: None,
            password: None,
            role: None,
        };
        let dto = request.into_domain().unwrap();
        assert!(dto.name.is_none() && dto.email.is_none());
        assert!(dto.password.is_none() && dto.role.is_none());
    }
}
