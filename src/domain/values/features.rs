//! Plan feature set

use crate::shared::errors::DomainError;

/// Ordered set of feature labels attached to a plan.
///
/// Entries are trimmed and deduplicated (first occurrence wins). The set is
/// never empty: construction from an empty list fails and `remove` refuses
/// to drop the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features(Vec<String>);

impl Features {
    pub fn new<I, S>(raw: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut features: Vec<String> = Vec::new();
        for entry in raw {
            let entry = entry.into();
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                return Err(DomainError::Validation(
                    "feature name cannot be blank".into(),
                ));
            }
            if !features.iter().any(|f| f == trimmed) {
                features.push(trimmed.to_string());
            }
        }
        if features.is_empty() {
            return Err(DomainError::Validation(
                "plan must have at least one feature".into(),
            ));
        }
        Ok(Self(features))
    }

    /// Returns a set including `feature`. Idempotent for duplicates.
    pub fn add(&self, feature: &str) -> Result<Features, DomainError> {
        let trimmed = feature.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "feature name cannot be blank".into(),
            ));
        }
        if self.has(trimmed) {
            return Ok(self.clone());
        }
        let mut features = self.0.clone();
        features.push(trimmed.to_string());
        Ok(Self(features))
    }

    /// Returns a set without `feature`. Removing an absent entry is a no-op;
    /// removing the last entry fails.
    pub fn remove(&self, feature: &str) -> Result<Features, DomainError> {
        let trimmed = feature.trim();
        if !self.has(trimmed) {
            return Ok(self.clone());
        }
        if self.0.len() == 1 {
            return Err(DomainError::Validation(
                "plan must have at least one feature".into(),
            ));
        }
        Ok(Self(
            self.0.iter().filter(|f| *f != trimmed).cloned().collect(),
        ))
    }

    pub fn has(&self, feature: &str) -> bool {
        self.0.iter().any(|f| f == feature.trim())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        // Invariant: construction guarantees non-empty
        self.0.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────
