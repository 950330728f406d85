//! Company contact value objects

use std::fmt;

use crate::shared::errors::DomainError;

/// Phone number normalized to bare digits (7..=15 of them).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub const MIN_DIGITS: usize = 7;
    pub const MAX_DIGITS: usize = 15;

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < Self::MIN_DIGITS || digits.len() > Self::MAX_DIGITS {
            return Err(DomainError::Validation(format!(
                "phone must contain {}..={} digits",
                Self::MIN_DIGITS,
                Self::MAX_DIGITS
            )));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Postal address, trimmed, non-empty, at most 500 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub const MAX_LEN: usize = 500;

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation("address cannot be empty".into()));
        }
        if value.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "address cannot exceed {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_strips_formatting() {
        let phone = Phone::parse("+1 (555) 123-4567").unwrap();
        assert_eq!(phone.as_str(), "15551234567");
    }

    #[test]
    fn phone_digit_bounds_are_enforced() {
        assert!(Phone::parse("123456").is_err());
        assert!(Phone::parse("1234567").is_ok());
        assert!(Phone::parse("1234567890123456").is_err());
    }

    #[test]
    fn address_is_trimmed_and_bounded() {
        assert_eq!(Address::parse("  1 Main St  ").unwrap().as_str(), "1 Main St");
        assert!(Address::parse("   ").is_err());
        assert!(Address::parse(&"x".repeat(501)).is_err());
    }
}
