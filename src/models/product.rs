//! Product catalog record.

use serde::{Deserialize, Serialize};

/// One row of the product catalog. `product_id` is unique within a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub product_name: String,
    pub sub_category: String,
    pub price: f64,
}

impl ProductRecord {
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        sub_category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            sub_category: sub_category.into(),
            price,
        }
    }

    /// Check the row-level constraints that deserialization cannot express.
    pub fn validate(&self) -> Result<(), String> {
        super::require_id("product_id", &self.product_id)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a non-negative number, got {}", self.price));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_invalid() {
        let p = ProductRecord::new("p1", "Kettle", "Kitchen", -1.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn zero_price_is_valid() {
        let p = ProductRecord::new("p1", "Sample", "Kitchen", 0.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn blank_product_id_is_invalid() {
        let p = ProductRecord::new("  ", "Mug", "Kitchen", 10.0);
        assert!(p.validate().is_err());
    }
}
