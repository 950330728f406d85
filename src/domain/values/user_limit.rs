//! Per-plan user limit
//!
//! Historically "unlimited" was spelled two ways: a `-1` sentinel in the
//! plan record and a null/zero column treated as no-limit by the admission
//! check. Both spellings normalize to one canonical `Unlimited` variant at
//! construction so admission control has a single code path.

use std::fmt;

use crate::shared::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLimit {
    Unlimited,
    LimitedTo(u32),
}

impl UserLimit {
    pub const MAX_LIMIT: u32 = 1_000_000;

    /// Accepts the raw wire/storage value: anything ≤ 0 (the legacy `-1`
    /// sentinel included) means unlimited.
    pub fn from_raw(raw: i64) -> Result<Self, DomainError> {
        if raw <= 0 {
            return Ok(Self::Unlimited);
        }
        if raw > Self::MAX_LIMIT as i64 {
            return Err(DomainError::Validation(format!(
                "user limit cannot exceed {}",
                Self::MAX_LIMIT
            )));
        }
        Ok(Self::LimitedTo(raw as u32))
    }

    pub fn limited(n: u32) -> Result<Self, DomainError> {
        if n == 0 {
            return Ok(Self::Unlimited);
        }
        Self::from_raw(n as i64)
    }

    /// The storage/wire spelling: `-1` for unlimited.
    pub fn as_raw(&self) -> i64 {
        match self {
            Self::Unlimited => -1,
            Self::LimitedTo(n) => *n as i64,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Whether one more user fits under this limit.
    pub fn can_add(&self, current: u64) -> bool {
        match self {
            Self::Unlimited => true,
            Self::LimitedTo(n) => current < *n as u64,
        }
    }

    /// `None` for unlimited plans.
    pub fn remaining_slots(&self, current: u64) -> Option<u64> {
        match self {
            Self::Unlimited => None,
            Self::LimitedTo(n) => Some((*n as u64).saturating_sub(current)),
        }
    }
}

impl fmt::Display for UserLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::LimitedTo(n) => write!(f, "{n}"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_and_zero_raw_mean_unlimited() {
        assert!(UserLimit::from_raw(-1).unwrap().is_unlimited());
        assert!(UserLimit::from_raw(0).unwrap().is_unlimited());
        assert!(UserLimit::from_raw(-42).unwrap().is_unlimited());
    }

    #[test]
    fn positive_raw_is_a_hard_limit() {
        let limit = UserLimit::from_raw(5).unwrap();
        assert_eq!(limit, UserLimit::LimitedTo(5));
        assert_eq!(limit.as_raw(), 5);
    }

    #[test]
    fn unlimited_serializes_as_minus_one() {
        assert_eq!(UserLimit::Unlimited.as_raw(), -1);
    }

    #[test]
    fn limit_above_maximum_is_rejected() {
        assert!(UserLimit::from_raw(1_000_001).is_err());
        assert!(UserLimit::from_raw(1_000_000).is_ok());
    }

    #[test]
    fn can_add_is_strict_at_the_boundary() {
        let limit = UserLimit::LimitedTo(3);
        assert!(limit.can_add(2));
        assert!(!limit.can_add(3));
        assert!(!limit.can_add(4));
        assert!(UserLimit::Unlimited.can_add(u64::MAX));
    }

    #[test]
    fn remaining_slots_never_underflow() {
        let limit = UserLimit::LimitedTo(3);
        assert_eq!(limit.remaining_slots(1), Some(2));
        assert_eq!(limit.remaining_slots(5), Some(0));
        assert_eq!(UserLimit::Unlimited.remaining_slots(10), None);
    }
}
