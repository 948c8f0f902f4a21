//! Quantity type - a value with an associated unit

use std::fmt;
use serde::{Serialize, Deserialize};
use exacta_core::Number;
use crate::{ConversionError, DimensionCategory, Unit};

/// A transient measurement: an exact value and the unit it is expressed in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Number,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: Number, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    pub fn category(&self) -> DimensionCategory {
        self.unit.category
    }

    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Value expressed in the category base unit
    pub fn base_value(&self) -> Number {
        self.unit.to_base(&self.value)
    }

    /// Re-express in another unit of the same category
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, ConversionError> {
        if !self.unit.is_compatible(target) {
            return Err(ConversionError::IncompatibleCategory {
                from: self.unit.name.clone(),
                to: target.name.clone(),
                from_category: self.unit.category,
                to_category: target.category,
            });
        }
        let value = target.from_base(&self.base_value())?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Nearest f64 of the exact value
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value.to_f64(), self.unit.name)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        // Same physical amount, whatever the unit
        self.is_compatible(other) && self.base_value() == other.base_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("meter", DimensionCategory::Length, Number::from_i64(1))
    }

    fn centimeter() -> Unit {
        Unit::new("centimeter", DimensionCategory::Length, Number::from_ratio(1, 100).unwrap())
    }

    fn kilogram() -> Unit {
        Unit::new("kilogram", DimensionCategory::Mass, Number::from_i64(1))
    }

    #[test]
    fn test_convert_to() {
        let q = Quantity::new(Number::from_str("1.5").unwrap(), meter());
        let cm = q.convert_to(&centimeter()).unwrap();
        assert_eq!(cm.value, Number::from_i64(150));
        assert_eq!(cm.unit.name, "centimeter");
    }

    #[test]
    fn test_convert_to_incompatible() {
        let q = Quantity::new(Number::from_i64(1), meter());
        let err = q.convert_to(&kilogram()).unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleCategory { .. }));
    }

    #[test]
    fn test_equality_across_units() {
        let a = Quantity::new(Number::from_i64(1), meter());
        let b = Quantity::new(Number::from_i64(100), centimeter());
        assert_eq!(a, b);
        let c = Quantity::new(Number::from_i64(1), kilogram());
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let q = Quantity::new(Number::from_str("0.25").unwrap(), meter());
        assert_eq!(q.to_string(), "0.25 meter");
    }
}
