//! Aggregate lifecycle state
//!
//! Soft delete modeled as an explicit state instead of a nullable timestamp:
//! an aggregate is either `Active` or `Deleted { at }`, and repository reads
//! say up front which lifecycle states they include.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Active,
    Deleted {
        at: DateTime<Utc>,
    },
}

impl LifecycleState {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Deleted { at } => Some(*at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_active() {
        let state = LifecycleState::default();
        assert!(!state.is_deleted());
        assert_eq!(state.deleted_at(), None);
    }

    #[test]
    fn deleted_state_carries_its_timestamp() {
        let at = Utc::now();
        let state = LifecycleState::Deleted { at };
        assert!(state.is_deleted());
        assert_eq!(state.deleted_at(), Some(at));
    }
}
