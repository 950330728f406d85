//! Company service-layer inputs

use crate::domain::values::{Address, Email, Name, PlainPassword, Phone, PlanId};

/// Input for creating a company together with its initial plan and the
/// bootstrap admin account. Admin name falls back to the company name when
/// omitted.
#[derive(Debug, Clone)]
pub struct CreateCompanyDto {
    pub name: Name,
    pub email: Email,
    pub phone: Phone,
    pub address: Address,
    pub is_active: Option<bool>,
    pub plan_id: PlanId,
    pub admin_name: Option<Name>,
    pub admin_email: Email,
    pub admin_password: PlainPassword,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCompanyDto {
    pub name: Option<Name>,
    pub email: Option<Email>,
    pub phone: Option<Phone>,
    pub address: Option<Address>,
    pub is_active: Option<bool>,
}
