use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A star rating between [`Rating::MIN`] and [`Rating::MAX`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> AppResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::InvalidInput(format!(
                "Rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_accepts_one_through_five() {
        for value in 1..=5 {
            assert_eq!(Rating::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn test_rating_rejects_out_of_range() {
        assert!(matches!(Rating::new(0), Err(AppError::InvalidInput(_))));
        assert!(matches!(Rating::new(6), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_rating_serde_as_plain_number() {
        let rating = Rating::new(4).unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "4");
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
