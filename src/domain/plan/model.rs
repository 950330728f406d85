//! Plan aggregate
//!
//! Plans are platform-global: every company subscribes to one of them and
//! inherits its user limit. Deleting a plan hides it from new subscriptions
//! but existing subscriptions keep pointing at it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::lifecycle::LifecycleState;
use crate::domain::values::{Features, MonthlyPrice, Name, PlanId, UserLimit};
use crate::shared::errors::DomainError;

#[derive(Debug, Clone)]
pub struct Plan {
    pub id: PlanId,
    pub name: Name,
    pub monthly_price: MonthlyPrice,
    pub user_limit: UserLimit,
    pub features: Features,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: LifecycleState,
}

impl Plan {
    pub fn create(
        name: Name,
        monthly_price: MonthlyPrice,
        user_limit: UserLimit,
        features: Features,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PlanId::UNASSIGNED,
            name,
            monthly_price,
            user_limit,
            features,
            is_active: true,
            created_at: now,
            updated_at: now,
            state: LifecycleState::Active,
        }
    }

    pub fn update_name(&mut self, name: Name) {
        self.name = name;
        self.touch();
    }

    pub fn update_price(&mut self, price: MonthlyPrice) {
        self.monthly_price = price;
        self.touch();
    }

    pub fn update_user_limit(&mut self, limit: UserLimit) {
        self.user_limit = limit;
        self.touch();
    }

    pub fn update_features(&mut self, features: Features) {
        self.features = features;
        self.touch();
    }

    pub fn add_feature(&mut self, feature: &str) -> Result<(), DomainError> {
        self.features = self.features.add(feature)?;
        self.touch();
        Ok(())
    }

    pub fn remove_feature(&mut self, feature: &str) -> Result<(), DomainError> {
        self.features = self.features.remove(feature)?;
        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.has(feature)
    }

    pub fn is_free(&self) -> bool {
        self.monthly_price.is_free()
    }

    pub fn annual_price(&self) -> Decimal {
        self.monthly_price.annual()
    }

    pub fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    pub fn delete(&mut self) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::AlreadyInState("Plan is already deleted".into()));
        }
        self.state = LifecycleState::Deleted { at: Utc::now() };
        self.touch();
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), DomainError> {
        if !self.is_deleted() {
            return Err(DomainError::AlreadyInState("Plan is not deleted".into()));
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
