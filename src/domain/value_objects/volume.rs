use crate::domain::errors::ValidationError;

/// Volumetric measure in cubic storage units. Non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Volume {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::MustBeFinite);
        }
        if value < 0.0 {
            return Err(ValidationError::MustBeNonNegative);
        }
        Ok(Volume(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_new_valid() {
        let volume = Volume::new(12.5);
        assert!(volume.is_ok());
        assert_eq!(volume.unwrap().value(), 12.5);
    }

    #[test]
    fn test_volume_new_zero() {
        let volume = Volume::new(0.0);
        assert!(volume.is_ok());
        assert_eq!(volume.unwrap().value(), 0.0);
    }

    #[test]
    fn test_volume_new_negative() {
        let volume = Volume::new(-1.0);
        assert_eq!(volume.unwrap_err(), ValidationError::MustBeNonNegative);
    }

    #[test]
    fn test_volume_new_nan() {
        let volume = Volume::new(f64::NAN);
        assert_eq!(volume.unwrap_err(), ValidationError::MustBeFinite);
    }

    #[test]
    fn test_volume_new_infinite() {
        let volume = Volume::new(f64::INFINITY);
        assert_eq!(volume.unwrap_err(), ValidationError::MustBeFinite);
    }
}
