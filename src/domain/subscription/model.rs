//! Subscription aggregate
//!
//! Links a company to a plan for a period. At most one subscription per
//! company is current at any instant; the invariant is procedural (plan
//! change deactivates the old record before inserting the new one), not a
//! storage constraint.

use chrono::{DateTime, Months, Utc};

use crate::domain::values::{CompanyId, PlanId, SubscriptionId};

#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub company_id: CompanyId,
    pub plan_id: PlanId,
    pub is_active: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// New active subscription running one calendar month from `starts_at`.
    pub fn start(company_id: CompanyId, plan_id: PlanId, starts_at: DateTime<Utc>) -> Self {
        Self {
            id: SubscriptionId::UNASSIGNED,
            company_id,
            plan_id,
            is_active: true,
            starts_at,
            ends_at: starts_at + Months::new(1),
            created_at: starts_at,
        }
    }

    /// Ends the subscription at `at`: inactive, `ends_at` pinned to the
    /// deactivation instant.
    pub fn deactivate(&mut self, at: DateTime<Utc>) {
        self.is_active = false;
        self.ends_at = at;
    }

    /// Active flag set and not yet past its end.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.ends_at > now
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn start_runs_one_calendar_month() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let sub = Subscription::start(CompanyId::new(1), PlanId::new(2), t0);
        assert!(sub.is_active);
        assert_eq!(sub.starts_at, t0);
        assert_eq!(sub.ends_at, Utc.with_ymd_and_hms(2026, 2, 15, 12, 0, 0).unwrap());
        assert!(sub.is_current(t0));
    }

    #[test]
    fn deactivate_pins_ends_at() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
        let mut sub = Subscription::start(CompanyId::new(1), PlanId::new(2), t0);

        sub.deactivate(t1);
        assert!(!sub.is_active);
        assert_eq!(sub.ends_at, t1);
        assert!(!sub.is_current(t1));
    }

    #[test]
    fn expired_subscription_is_not_current() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let sub = Subscription::start(CompanyId::new(1), PlanId::new(2), t0);
        let late = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert!(sub.is_active);
        assert!(!sub.is_current(late));
    }

    #[test]
    fn month_end_clamps_instead_of_overflowing() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 31, 8, 0, 0).unwrap();
        let sub = Subscription::start(CompanyId::new(1), PlanId::new(2), t0);
        assert_eq!(sub.ends_at, Utc.with_ymd_and_hms(2026, 2, 28, 8, 0, 0).unwrap());
    }
}
