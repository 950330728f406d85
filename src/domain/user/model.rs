//! User aggregate

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::lifecycle::LifecycleState;
use crate::domain::values::{CompanyId, Email, HashedPassword, Name, UserId};
use crate::shared::errors::DomainError;

/// Access role, a flat tag with no hierarchy.
///
/// `admin` is scoped to exactly one company; `super-admin` operates across
/// tenants; `user` has no administrative access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    SuperAdmin,
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn is_admin_level(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super-admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(DomainError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// A platform or company account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: Name,
    pub email: Email,
    pub password: HashedPassword,
    pub role: Role,
    /// `None` for platform-level accounts.
    pub company_id: Option<CompanyId>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: LifecycleState,
}

impl User {
    /// New active user with an unassigned id. The caller has already hashed
    /// the password; plaintext never reaches the aggregate.
    pub fn create(
        name: Name,
        email: Email,
        password: HashedPassword,
        role: Role,
        company_id: Option<CompanyId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::UNASSIGNED,
            name,
            email,
            password,
            role,
            company_id,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
            state: LifecycleState::Active,
        }
    }

    pub fn update_name(&mut self, name: Name) {
        self.name = name;
        self.touch();
    }

    /// Changing the address un-verifies it.
    pub fn update_email(&mut self, email: Email) {
        self.email = email;
        self.email_verified_at = None;
        self.touch();
    }

    pub fn update_password(&mut self, password: HashedPassword) {
        self.password = password;
        self.touch();
    }

    pub fn verify_email(&mut self) {
        self.email_verified_at = Some(Utc::now());
        self.touch();
    }

    /// Pure role assignment: consumes and returns the user.
    #[must_use]
    pub fn assign_role(mut self, role: Role) -> Self {
        self.role = role;
        self.updated_at = Utc::now();
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    pub fn delete(&mut self) -> Result<(), DomainError> {
        if self.state.is_deleted() {
            return Err(DomainError::AlreadyInState("User is already deleted".into()));
        }
        let now = Utc::now();
        self.state = LifecycleState::Deleted { at: now };
        self.updated_at = now;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), DomainError> {
        if !self.state.is_deleted() {
            return Err(DomainError::AlreadyInState("User is not deleted".into()));
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
