//! Dimension categories
//!
//! Every unit belongs to exactly one category, and conversion is only
//! defined between units of the same category.

use std::fmt;
use serde::{Serialize, Deserialize};

/// The closed set of physical categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionCategory {
    Length,
    Mass,
    Time,
    Temperature,
    Volume,
    Speed,
}

impl DimensionCategory {
    /// All categories in declaration order
    pub const ALL: [DimensionCategory; 6] = [
        DimensionCategory::Length,
        DimensionCategory::Mass,
        DimensionCategory::Time,
        DimensionCategory::Temperature,
        DimensionCategory::Volume,
        DimensionCategory::Speed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DimensionCategory::Length => "length",
            DimensionCategory::Mass => "mass",
            DimensionCategory::Time => "time",
            DimensionCategory::Temperature => "temperature",
            DimensionCategory::Volume => "volume",
            DimensionCategory::Speed => "speed",
        }
    }

    /// Canonical base unit of the built-in registry
    pub fn base_unit_name(&self) -> &'static str {
        match self {
            DimensionCategory::Length => "meter",
            DimensionCategory::Mass => "kilogram",
            DimensionCategory::Time => "second",
            DimensionCategory::Temperature => "kelvin",
            DimensionCategory::Volume => "liter",
            DimensionCategory::Speed => "meter_per_second",
        }
    }
}

impl fmt::Display for DimensionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_lowercase() {
        for category in DimensionCategory::ALL {
            assert_eq!(category.name(), category.name().to_lowercase());
            assert_eq!(category.to_string(), category.name());
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DimensionCategory::Speed).unwrap();
        assert_eq!(json, "\"speed\"");
    }
}
