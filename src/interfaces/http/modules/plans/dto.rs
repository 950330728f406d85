//! Plan DTOs
//!
//! Prices travel as decimal strings ("19.00") so no client ever rounds
//! them through a float. The user limit keeps its storage spelling:
//! `-1` means unlimited.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::plan::{CreatePlanDto, Plan, UpdatePlanDto};
use crate::domain::values::{Features, MonthlyPrice, Name, UserLimit};
use crate::domain::{DomainError, DomainResult};

/// Plan API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanDto {
    pub id: i64,
    pub name: String,
    /// Decimal string, e.g. "19.00"
    pub monthly_price: String,
    /// `-1` means unlimited
    pub user_limit: i64,
    pub features: Vec<String>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Plan> for PlanDto {
    fn from(p: Plan) -> Self {
        Self {
            id: p.id.value(),
            name: p.name.as_str().to_string(),
            monthly_price: p.monthly_price.to_string(),
            user_limit: p.user_limit.as_raw(),
            features: p.features.as_slice().to_vec(),
            is_active: p.is_active,
            is_deleted: p.is_deleted(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

fn parse_price(raw: &str) -> DomainResult<MonthlyPrice> {
    let amount = Decimal::from_str(raw.trim())
        .map_err(|_| DomainError::Validation(format!("'{raw}' is not a valid price")))?;
    MonthlyPrice::new(amount)
}

/// Create plan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlanRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,
    /// Decimal string, e.g. "19.00"
    pub monthly_price: String,
    /// `-1` (or any value ≤ 0) means unlimited
    #[serde(default = "default_user_limit")]
    pub user_limit: i64,
    #[validate(length(min = 1, message = "at least one feature is required"))]
    pub features: Vec<String>,
}

fn default_user_limit() -> i64 {
    -1
}

impl CreatePlanRequest {
    pub fn into_domain(self) -> DomainResult<CreatePlanDto> {
        Ok(CreatePlanDto {
            name: Name::parse(&self.name)?,
            monthly_price: parse_price(&self.monthly_price)?,
            user_limit: UserLimit::from_raw(self.user_limit)?,
            features: Features::new(self.features)?,
        })
    }
}

/// Plan update request; omitted fields stay unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePlanRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,
    /// Decimal string, e.g. "19.00"
    pub monthly_price: Option<String>,
    /// `-1` (or any value ≤ 0) means unlimited
    pub user_limit: Option<i64>,
    #[validate(length(min = 1, message = "at least one feature is required"))]
    pub features: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl UpdatePlanRequest {
    pub fn into_domain(self) -> DomainResult<UpdatePlanDto> {
        Ok(UpdatePlanDto {
            name: self.name.as_deref().map(Name::parse).transpose()?,
            monthly_price: self.monthly_price.as_deref().map(parse_price).transpose()?,
            user_limit: self.user_limit.map(UserLimit::from_raw).transpose()?,
            features: self.features.map(Features::new).transpose()?,
            is_active: self.is_active,
        })
    }
}

/// Plan list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPlansParams {
    /// Match against plan name
    pub search: Option<String>,
    /// `active` or `deleted`; default lists every non-deleted plan
    pub filter: Option<String>,
    /// Lower price bound, decimal string; must come with `max_price`
    pub min_price: Option<String>,
    /// Upper price bound, decimal string; must come with `min_price`
    pub max_price: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListPlansParams {
    /// The price window, when one was requested. A single bound is an error.
    pub fn price_bounds(&self) -> DomainResult<Option<(MonthlyPrice, MonthlyPrice)>> {
        match (self.min_price.as_deref(), self.max_price.as_deref()) {
            (None, None) => Ok(None),
            (Some(min), Some(max)) => Ok(Some((parse_price(min)?, parse_price(max)?))),
            _ => Err(DomainError::Validation(
                "min_price and max_price must be provided together".into(),
            )),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_price_and_limit() {
        let request = CreatePlanRequest {
            name: "Starter".into(),
            monthly_price: "19.99".into(),
            user_limit: -1,
            features: vec!["api".into(), "reports".into()],
        };
        let dto = request.into_domain().unwrap();
        assert_eq!(dto.monthly_price.to_string(), "19.99");
        assert!(dto.user_limit.is_unlimited());
        assert_eq!(dto.features.len(), 2);
    }

    #[test]
    fn garbage_price_is_a_validation_error() {
        let request = CreatePlanRequest {
            name: "Starter".into(),
            monthly_price: "twenty".into(),
            user_limit: 10,
            features: vec!["api".into()],
        };
        assert!(matches!(
            request.into_domain(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn price_bounds_require_both_ends() {
        let mut params = ListPlansParams {
            search: None,
            filter: None,
            min_price: Some("10".into()),
            max_price: None,
            page: None,
            limit: None,
        };
        assert!(params.price_bounds().is_err());

        params.max_price = Some("50".into());
        let (min, max) = params.price_bounds().unwrap().unwrap();
        assert!(min.amount() < max.amount());

        params.min_price = None;
        params.max_price = None;
        assert!(params.price_bounds().unwrap().is_none());
    }
}
