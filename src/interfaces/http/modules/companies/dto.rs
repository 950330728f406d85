//! Company DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::CreatedCompany;
use crate::domain::company::{Company, CreateCompanyDto, UpdateCompanyDto};
use crate::domain::values::{Address, Email, Name, Phone, PlainPassword, PlanId};
use crate::domain::{DomainResult, Subscription};
use crate::interfaces::http::modules::users::dto::UserDto;

/// Company API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyDto {
    fn from(c: Company) -> Self {
        Self {
            id: c.id.value(),
            name: c.name.as_str().to_string(),
            email: c.email.as_str().to_string(),
            phone: c.phone.as_str().to_string(),
            address: c.address.as_str().to_string(),
            is_active: c.is_active,
            is_deleted: c.is_deleted(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Subscription API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionDto {
    pub id: i64,
    pub company_id: i64,
    pub plan_id: i64,
    pub is_active: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Subscription> for SubscriptionDto {
    fn from(s: Subscription) -> Self {
        Self {
            id: s.id.value(),
            company_id: s.company_id.value(),
            plan_id: s.plan_id.value(),
            is_active: s.is_active,
            starts_at: s.starts_at,
            ends_at: s.ends_at,
            created_at: s.created_at,
        }
    }
}

/// Signup result: the new company plus its bootstrap admin account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedCompanyResponse {
    pub company: CompanyDto,
    pub admin: UserDto,
}

impl From<CreatedCompany> for CreatedCompanyResponse {
    fn from(created: CreatedCompany) -> Self {
        Self {
            company: CompanyDto::from(created.company),
            admin: UserDto::from(created.admin),
        }
    }
}

/// Company signup request
///
/// Registers the tenant, subscribes it to `plan_id` and provisions the
/// admin account in one call. `admin_name` defaults to the company name.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7, max = 32))]
    pub phone: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    pub is_active: Option<bool>,
    pub plan_id: i64,
    #[validate(length(min = 2, max = 255))]
    pub admin_name: Option<String>,
    #[validate(email)]
    pub admin_email: String,
    #[validate(length(min = 8, max = 255))]
    pub admin_password: String,
}

impl CreateCompanyRequest {
    pub fn into_domain(self) -> DomainResult<CreateCompanyDto> {
        Ok(CreateCompanyDto {
            name: Name::parse(&self.name)?,
            email: Email::parse(&self.email)?,
            phone: Phone::parse(&self.phone)?,
            address: Address::parse(&self.address)?,
            is_active: self.is_active,
            plan_id: PlanId::new(self.plan_id),
            admin_name: self.admin_name.as_deref().map(Name::parse).transpose()?,
            admin_email: Email::parse(&self.admin_email)?,
            admin_password: PlainPassword::parse(&self.admin_password)?,
        })
    }
}

/// Company update request; omitted fields stay unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 7, max = 32))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateCompanyRequest {
    pub fn into_domain(self) -> DomainResult<UpdateCompanyDto> {
        Ok(UpdateCompanyDto {
            name: self.name.as_deref().map(Name::parse).transpose()?,
            email: self.email.as_deref().map(Email::parse).transpose()?,
            phone: self.phone.as_deref().map(Phone::parse).transpose()?,
            address: self.address.as_deref().map(Address::parse).transpose()?,
            is_active: self.is_active,
        })
    }
}

/// Request to switch the company onto another plan
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePlanRequest {
    #[validate(range(min = 1, message = "plan_id must be ≥ 1"))]
    pub plan_id: i64,
}

/// Company list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCompaniesParams {
    /// Match against company name or email
    pub search: Option<String>,
    /// `active` or `deleted`; default lists every non-deleted company
    pub filter: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ── Tests ──────────────────────────────────────────────────────
