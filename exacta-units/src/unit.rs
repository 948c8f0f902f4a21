//! Unit representation with exact affine conversion factors

use std::fmt;
use serde::{Serialize, Deserialize};
use exacta_core::{Number, NumberError};
use crate::DimensionCategory;

/// A named unit with its category and exact transform to the category base.
///
/// `base = value * scale + offset`. Only temperature units carry an offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Canonical lowercase identifier (e.g. "meter", "kilometer_per_hour")
    pub name: String,
    pub category: DimensionCategory,
    /// Factor to the category base unit
    pub scale: Number,
    /// Offset to the category base unit
    pub offset: Number,
    /// Case-insensitive synonyms: symbols, plurals, British spellings
    pub aliases: Vec<String>,
}

impl Unit {
    /// Create a proportional unit (no offset)
    pub fn new(name: &str, category: DimensionCategory, scale: Number) -> Self {
        Unit {
            name: name.to_string(),
            category,
            scale,
            offset: Number::from_i64(0),
            aliases: Vec::new(),
        }
    }

    /// Create an affine unit (temperature)
    pub fn with_offset(name: &str, category: DimensionCategory, scale: Number, offset: Number) -> Self {
        Unit {
            name: name.to_string(),
            category,
            scale,
            offset,
            aliases: Vec::new(),
        }
    }

    /// Builder: add synonyms
    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    /// Base unit of its category: scale 1, offset 0
    pub fn is_base(&self) -> bool {
        self.scale.is_one() && self.offset.is_zero()
    }

    pub fn has_offset(&self) -> bool {
        !self.offset.is_zero()
    }

    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.category == other.category
    }

    /// Convert a value in this unit to the category base unit
    pub fn to_base(&self, value: &Number) -> Number {
        value.mul(&self.scale).add(&self.offset)
    }

    /// Convert a value in the category base unit to this unit
    pub fn from_base(&self, base: &Number) -> Result<Number, NumberError> {
        base.sub(&self.offset).checked_div(&self.scale)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("meter", DimensionCategory::Length, Number::from_i64(1))
    }

    fn kilometer() -> Unit {
        Unit::new("kilometer", DimensionCategory::Length, Number::from_i64(1000))
    }

    fn second() -> Unit {
        Unit::new("second", DimensionCategory::Time, Number::from_i64(1))
    }

    fn celsius() -> Unit {
        Unit::with_offset(
            "celsius",
            DimensionCategory::Temperature,
            Number::from_i64(1),
            Number::from_str("273.15").unwrap(),
        )
    }

    #[test]
    fn test_base_unit() {
        assert!(meter().is_base());
        assert!(!kilometer().is_base());
        assert!(!celsius().is_base());
        assert!(celsius().has_offset());
    }

    #[test]
    fn test_compatible_units() {
        assert!(meter().is_compatible(&kilometer()));
        assert!(!meter().is_compatible(&second()));
    }

    #[test]
    fn test_to_base() {
        let km = kilometer();
        assert_eq!(km.to_base(&Number::from_i64(5)), Number::from_i64(5000));
    }

    #[test]
    fn test_from_base() {
        let km = kilometer();
        let value = km.from_base(&Number::from_i64(100)).unwrap();
        assert_eq!(value, Number::from_str("0.1").unwrap());
    }

    #[test]
    fn test_affine_round_trip() {
        let c = celsius();
        let base = c.to_base(&Number::from_i64(-40));
        assert_eq!(base, Number::from_str("233.15").unwrap());
        assert_eq!(c.from_base(&base).unwrap(), Number::from_i64(-40));
    }

    #[test]
    fn test_zero_scale_is_rejected_at_division() {
        let broken = Unit::new("broken", DimensionCategory::Length, Number::from_i64(0));
        assert_eq!(broken.from_base(&Number::from_i64(1)), Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_aliases_builder() {
        let m = meter().aliases(&["m", "metre"]);
        assert_eq!(m.aliases, vec!["m".to_string(), "metre".to_string()]);
        assert_eq!(m.to_string(), "meter");
    }
}
