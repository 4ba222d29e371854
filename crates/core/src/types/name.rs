//! Listing name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ListingName`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ListingNameError {
    /// The input string is empty.
    #[error("name cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A cafe listing name.
///
/// Names are the user-facing identity of a listing and are unique across the
/// collection (the store enforces uniqueness; this type only validates shape).
///
/// ## Constraints
///
/// - Must not be empty
/// - Length: at most 250 characters
///
/// ## Examples
///
/// ```
/// use brewfinder_core::ListingName;
///
/// assert!(ListingName::parse("Blue Bottle").is_ok());
/// assert!(ListingName::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ListingName(String);

impl ListingName {
    /// Maximum length of a listing name.
    pub const MAX_LENGTH: usize = 250;

    /// Parse a `ListingName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or longer than 250 characters.
    pub fn parse(s: &str) -> Result<Self, ListingNameError> {
        if s.is_empty() {
            return Err(ListingNameError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(ListingNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ListingName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ListingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ListingName {
    type Err = ListingNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ListingName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        assert!(ListingName::parse("Blue Bottle").is_ok());
        assert!(ListingName::parse("Café Réveille").is_ok());
        assert!(ListingName::parse("a").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(ListingName::parse(""), Err(ListingNameError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(251);
        assert!(matches!(
            ListingName::parse(&long),
            Err(ListingNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_max_length_ok() {
        let max = "a".repeat(250);
        assert!(ListingName::parse(&max).is_ok());
    }

    #[test]
    fn test_display() {
        let name = ListingName::parse("Blue Bottle").unwrap();
        assert_eq!(format!("{name}"), "Blue Bottle");
    }

    #[test]
    fn test_serde_roundtrip() {
        let name = ListingName::parse("Blue Bottle").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Blue Bottle\"");

        let parsed: ListingName = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, name);
    }

    #[test]
    fn test_from_str() {
        let name: ListingName = "Blue Bottle".parse().unwrap();
        assert_eq!(name.as_str(), "Blue Bottle");
    }
}
