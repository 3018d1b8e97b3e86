//! User rating log record.

use serde::{Deserialize, Serialize};

/// Lowest accepted star rating.
pub const MIN_RATING: i64 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: i64 = 5;

/// One rating event. Users and products may repeat across rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user_id: String,
    pub product_id: String,
    pub rating: i64,
}

impl RatingRecord {
    pub fn new(user_id: impl Into<String>, product_id: impl Into<String>, rating: i64) -> Self {
        Self {
            user_id: user_id.into(),
            product_id: product_id.into(),
            rating,
        }
    }

    pub fn is_five_star(&self) -> bool {
        self.rating == MAX_RATING
    }

    pub fn validate(&self) -> Result<(), String> {
        super::require_id("user_id", &self.user_id)?;
        super::require_id("product_id", &self.product_id)?;
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                self.rating
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(RatingRecord::new("u1", "p1", 1).validate().is_ok());
        assert!(RatingRecord::new("u1", "p1", 5).validate().is_ok());
        assert!(RatingRecord::new("u1", "p1", 0).validate().is_err());
        assert!(RatingRecord::new("u1", "p1", 6).validate().is_err());
    }

    #[test]
    fn blank_ids_are_invalid() {
        assert!(RatingRecord::new("", "p1", 5).validate().is_err());
        assert!(RatingRecord::new("u1", " ", 5).validate().is_err());
    }

    #[test]
    fn five_star_detection() {
        assert!(RatingRecord::new("u1", "p1", 5).is_five_star());
        assert!(!RatingRecord::new("u1", "p1", 4).is_five_star());
    }
}
