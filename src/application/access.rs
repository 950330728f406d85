//! Authenticated caller identity and tenancy gates
//!
//! One predicate decides every cross-company question in the service layer:
//! super-admins see everything, admins see exactly their own company, plain
//! users see nothing administrative. All entry points that take a principal
//! route through here so the rule cannot drift between endpoints.

use crate::domain::user::Role;
use crate::domain::values::{CompanyId, UserId};
use crate::shared::errors::DomainError;

/// The authenticated caller, resolved from a bearer token.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role, company_id: Option<CompanyId>) -> Self {
        Self {
            user_id,
            role,
            company_id,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self.role, Role::SuperAdmin)
    }
}

/// Core tenancy predicate. An admin with no company on record fails closed,
/// as does any target without a company (only super-admins may touch
/// unscoped resources).
pub fn same_company_or_super_admin(principal: &Principal, target: Option<CompanyId>) -> bool {
    match principal.role {
        Role::SuperAdmin => true,
        Role::Admin => match (principal.company_id, target) {
            (Some(own), Some(other)) => own == other,
            _ => false,
        },
        Role::User => false,
    }
}

pub fn ensure_same_company_or_super_admin(
    principal: &Principal,
    target: Option<CompanyId>,
) -> Result<(), DomainError> {
    if same_company_or_super_admin(principal, target) {
        Ok(())
    } else {
        Err(DomainError::Forbidden("cross-company access".into()))
    }
}

pub fn require_admin_level(principal: &Principal) -> Result<(), DomainError> {
    if principal.role.is_admin_level() {
        Ok(())
    } else {
        Err(DomainError::Forbidden("admin access required".into()))
    }
}

pub fn require_super_admin(principal: &Principal) -> Result<(), DomainError> {
    if principal.is_super_admin() {
        Ok(())
    } else {
        Err(DomainError::Forbidden("super-admin access required".into()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role, company: Option<i64>) -> Principal {
        Principal::new(UserId::new(1), role, company.map(CompanyId::new))
    }

    #[test]
    fn super_admin_crosses_tenants() {
        let p = principal(Role::SuperAdmin, None);
        assert!(same_company_or_super_admin(&p, Some(CompanyId::new(5))));
        assert!(same_company_or_super_admin(&p, None));
    }

    #[test]
    fn admin_is_scoped_to_own_company() {
        let p = principal(Role::Admin, Some(3));
        assert!(same_company_or_super_admin(&p, Some(CompanyId::new(3))));
        assert!(!same_company_or_super_admin(&p, Some(CompanyId::new(4))));
        // unscoped targets are super-admin territory
        assert!(!same_company_or_super_admin(&p, None));
    }

    #[test]
    fn admin_without_company_fails_closed() {
        let p = principal(Role::Admin, None);
        assert!(!same_company_or_super_admin(&p, Some(CompanyId::new(3))));
        assert!(!same_company_or_super_admin(&p, None));
    }

    #[test]
    fn plain_user_never_passes() {
        let p = principal(Role::User, Some(3));
        assert!(!same_company_or_super_admin(&p, Some(CompanyId::new(3))));
        assert!(matches!(
            ensure_same_company_or_super_admin(&p, Some(CompanyId::new(3))),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn role_gates() {
        assert!(require_admin_level(&principal(Role::Admin, Some(1))).is_ok());
        assert!(require_admin_level(&principal(Role::User, None)).is_err());
        assert!(require_super_admin(&principal(Role::SuperAdmin, None)).is_ok());
        assert!(require_super_admin(&principal(Role::Admin, Some(1))).is_err());
    }
}
