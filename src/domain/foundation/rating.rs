//! Feedback rating value object (1 to 5 stars).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A user's satisfaction rating for the service, 1 (poor) to 5 (excellent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FeedbackRating(u8);

impl FeedbackRating {
    /// Creates a rating, returning error if outside 1..=5.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::out_of_range(
                "rating",
                MIN_RATING as i64,
                MAX_RATING as i64,
                value,
            ))
        }
    }

    /// Parses raw message text as a rating.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let value: i64 = text
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid_format("rating", "not a number"))?;
        Self::try_new(value)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for FeedbackRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value as i64)
    }
}

impl From<FeedbackRating> for u8 {
    fn from(rating: FeedbackRating) -> Self {
        rating.0
    }
}

impl fmt::Display for FeedbackRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_through_five() {
        for value in 1..=5 {
            assert_eq!(FeedbackRating::try_new(value).unwrap().value(), value as u8);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(FeedbackRating::try_new(0).is_err());
        assert!(FeedbackRating::try_new(6).is_err());
        assert!(FeedbackRating::try_new(-1).is_err());
    }

    #[test]
    fn parse_trims_and_rejects_text() {
        assert_eq!(FeedbackRating::parse(" 4 ").unwrap().value(), 4);
        assert!(matches!(
            FeedbackRating::parse("great"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            FeedbackRating::parse("7"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn deserialization_validates_range() {
        assert!(serde_json::from_str::<FeedbackRating>("3").is_ok());
        assert!(serde_json::from_str::<FeedbackRating>("9").is_err());
    }
}
