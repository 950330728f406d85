//! Display name value object

use std::fmt;

use crate::shared::errors::DomainError;

/// Trimmed human-readable name (user, company or plan), 2..=255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = 255;

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim().to_string();
        let chars = value.chars().count();
        if chars < Self::MIN_LEN {
            return Err(DomainError::Validation(format!(
                "name must be at least {} characters",
                Self::MIN_LEN
            )));
        }
        if chars > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "name cannot exceed {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(Name::parse("  Acme Corp  ").unwrap().as_str(), "Acme Corp");
    }

    #[test]
    fn single_character_is_rejected() {
        assert!(Name::parse("A").is_err());
        assert!(Name::parse("   A   ").is_err());
    }

    #[test]
    fn overlong_name_is_rejected() {
        assert!(Name::parse(&"x".repeat(256)).is_err());
    }

    #[test]
    fn multibyte_names_count_characters_not_bytes() {
        // 255 two-byte characters would exceed 255 bytes but is a valid name
        assert!(Name::parse(&"ё".repeat(255)).is_ok());
    }
}
