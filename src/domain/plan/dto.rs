//! Plan service-layer inputs

use crate::domain::values::{Features, MonthlyPrice, Name, UserLimit};

#[derive(Debug, Clone)]
pub struct CreatePlanDto {
    pub name: Name,
    pub monthly_price: MonthlyPrice,
    pub user_limit: UserLimit,
    pub features: Features,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePlanDto {
    pub name: Option<Name>,
    pub monthly_price: Option<MonthlyPrice>,
    pub user_limit: Option<UserLimit>,
    pub features: Option<Features>,
    pub is_active: Option<bool>,
}
