//! Email address value object

use std::fmt;

use crate::shared::errors::DomainError;

/// A normalized email address: trimmed, lowercased, format-checked.
///
/// The same type serves user accounts and company contact addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub const MAX_LEN: usize = 255;

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim().to_lowercase();
        if value.is_empty() {
            return Err(DomainError::Validation("email cannot be empty".into()));
        }
        if value.len() > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "email cannot exceed {} characters",
                Self::MAX_LEN
            )));
        }
        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(format!(
                "invalid email format: {value}"
            )));
        };
        let valid = !local.is_empty()
            && !domain.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !value.contains(char::is_whitespace)
            && !domain.contains('@');
        if !valid {
            return Err(DomainError::Validation(format!(
                "invalid email format: {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Tests ──────────────────────────────────────────────────────
