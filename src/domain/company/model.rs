//! Company aggregate
//!
//! The tenant: all user and subscription scoping keys off the company id.
//! Subscriptions are separate aggregates reached through the repository.

use chrono::{DateTime, Utc};

use crate::domain::lifecycle::LifecycleState;
use crate::domain::values::{Address, CompanyId, Email, Name, Phone};
use crate::shared::errors::DomainError;

#[derive(Debug, Clone)]
pub struct Company {
    pub id: CompanyId,
    pub name: Name,
    pub email: Email,
    pub phone: Phone,
    pub address: Address,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: LifecycleState,
}

impl Company {
    pub fn create(name: Name, email: Email, phone: Phone, address: Address, is_active: bool) -> Self {
        let now = Utc::now();
        Self {
            id: CompanyId::UNASSIGNED,
            name,
            email,
            phone,
            address,
            is_active,
            created_at: now,
            updated_at: now,
            state: LifecycleState::Active,
        }
    }

    pub fn update_name(&mut self, name: Name) {
        self.name = name;
        self.touch();
    }

    pub fn update_email(&mut self, email: Email) {
        self.email = email;
        self.touch();
    }

    pub fn update_phone(&mut self, phone: Phone) {
        self.phone = phone;
        self.touch();
    }

    pub fn update_address(&mut self, address: Address) {
        self.address = address;
        self.touch();
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    pub fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    pub fn delete(&mut self) -> Result<(), DomainError> {
        if self.state.is_deleted() {
            return Err(DomainError::AlreadyInState(
                "Company is already deleted".into(),
            ));
        }
        let now = Utc::now();
        self.state = LifecycleState::Deleted { at: now };
        self.updated_at = now;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), DomainError> {
        if !self.state.is_deleted() {
            return Err(DomainError::AlreadyInState("Company is not deleted".into()));
        }
        self.state = LifecycleState::Active;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_company() -> Company {
        Company::create(
            Name::parse("Acme Corp").unwrap(),
            Email::parse("contact@acme.io").unwrap(),
            Phone::parse("+1 555 000 1234").unwrap(),
            Address::parse("1 Main St, Springfield").unwrap(),
            true,
        )
    }

    #[test]
    fn create_defaults_to_active_lifecycle() {
        let company = sample_company();
        assert!(company.id.is_unassigned());
        assert!(company.is_active);
        assert!(!company.is_deleted());
    }

    #[test]
    fn deactivate_is_separate_from_soft_delete() {
        let mut company = sample_company();
        company.deactivate();
        assert!(!company.is_active);
        assert!(!company.is_deleted());
    }

    #[test]
    fn delete_and_restore_are_guarded() {
        let mut company = sample_company();
        assert!(matches!(
            company.restore(),
            Err(DomainError::AlreadyInState(_))
        ));
        company.delete().unwrap();
        assert!(matches!(
            company.delete(),
            Err(DomainError::AlreadyInState(_))
        ));
        company.restore().unwrap();
        assert!(!company.is_deleted());
    }
}
