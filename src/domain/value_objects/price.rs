use crate::domain::errors::ValidationError;

/// Per-item price. Non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::MustBeFinite);
        }
        if value < 0.0 {
            return Err(ValidationError::MustBeNonNegative);
        }
        Ok(Price(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_new_valid() {
        let price = Price::new(149.99);
        assert!(price.is_ok());
        assert_eq!(price.unwrap().value(), 149.99);
    }

    #[test]
    fn test_price_new_zero() {
        assert!(Price::new(0.0).is_ok());
    }

    #[test]
    fn test_price_new_negative() {
        let price = Price::new(-0.01);
        assert_eq!(price.unwrap_err(), ValidationError::MustBeNonNegative);
    }

    #[test]
    fn test_price_new_nan() {
        let price = Price::new(f64::NAN);
        assert_eq!(price.unwrap_err(), ValidationError::MustBeFinite);
    }
}
