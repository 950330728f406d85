//! Monthly price value object

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::shared::errors::DomainError;

/// A plan's monthly price: 0 ..= 999,999.99, stored at 2 decimal places
/// (midpoint rounds away from zero, matching everyday money rounding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthlyPrice(Decimal);

impl MonthlyPrice {
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount < Decimal::ZERO {
            return Err(DomainError::Validation(
                "monthly price cannot be negative".into(),
            ));
        }
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded > Self::max() {
            return Err(DomainError::Validation(
                "monthly price cannot exceed 999999.99".into(),
            ));
        }
        Ok(Self(rounded))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    fn max() -> Decimal {
        // 999,999.99
        Decimal::new(99_999_999, 2)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_free(&self) -> bool {
        self.0.is_zero()
    }

    pub fn add(&self, other: &MonthlyPrice) -> Result<MonthlyPrice, DomainError> {
        Self::new(self.0 + other.0)
    }

    /// Fails when the result would be negative.
    pub fn subtract(&self, other: &MonthlyPrice) -> Result<MonthlyPrice, DomainError> {
        Self::new(self.0 - other.0)
    }

    /// Price over a full year at the monthly rate.
    pub fn annual(&self) -> Decimal {
        self.0 * Decimal::from(12)
    }
}

impl fmt::Display for MonthlyPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Tests ──────────────────────────────────────────────────────
