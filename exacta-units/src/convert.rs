//! Category-checked conversion over a unit registry
//!
//! Order of checks: resolve both names, compare categories, then check
//! the value. The f64 input is read through its shortest decimal into an
//! exact rational, the affine transforms run exactly, and the result is
//! rounded to f64 once at the end.

use exacta_core::Number;
use tracing::debug;
use crate::{ConversionError, Quantity, Unit, UnitRegistry};

/// Stateless converter borrowing an immutable registry
#[derive(Debug, Clone, Copy)]
pub struct ConversionEngine<'a> {
    registry: &'a UnitRegistry,
}

impl<'a> ConversionEngine<'a> {
    pub fn new(registry: &'a UnitRegistry) -> Self {
        ConversionEngine { registry }
    }

    pub fn registry(&self) -> &'a UnitRegistry {
        self.registry
    }

    /// Convert `value` between two named units
    pub fn convert(&self, value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
        let (from, to) = self.resolve_pair(from_unit, to_unit)?;
        if !value.is_finite() {
            return Err(ConversionError::NonFinite(value));
        }
        let exact = Number::from_f64(value)?;
        let result = convert_between(&exact, from, to)?.to_f64();
        if !result.is_finite() {
            return Err(ConversionError::OutOfRange {
                value,
                from: from.name.clone(),
                to: to.name.clone(),
            });
        }
        debug!(value, from = %from.name, to = %to.name, result, "converted");
        Ok(result)
    }

    /// Convert without leaving exact arithmetic
    pub fn convert_exact(&self, value: &Number, from_unit: &str, to_unit: &str) -> Result<Number, ConversionError> {
        let (from, to) = self.resolve_pair(from_unit, to_unit)?;
        convert_between(value, from, to)
    }

    pub fn convert_quantity(&self, quantity: &Quantity, to_unit: &str) -> Result<Quantity, ConversionError> {
        let target = self.registry.resolve(to_unit).map_err(ConversionError::as_target)?;
        quantity.convert_to(target)
    }

    /// Express `value` of `unit` in its category base unit
    pub fn to_base(&self, value: &Number, unit: &str) -> Result<Quantity, ConversionError> {
        let unit = self.registry.resolve(unit).map_err(ConversionError::as_source)?;
        let base = self.registry.base_unit(unit.category).ok_or_else(|| ConversionError::UnknownUnit {
            unit: unit.category.base_unit_name().to_string(),
            supported: self.registry.canonical_names().into_iter().map(String::from).collect(),
        })?;
        Ok(Quantity::new(unit.to_base(value), base.clone()))
    }

    fn resolve_pair(&self, from_unit: &str, to_unit: &str) -> Result<(&'a Unit, &'a Unit), ConversionError> {
        let from = self.registry.resolve(from_unit).map_err(ConversionError::as_source)?;
        let to = self.registry.resolve(to_unit).map_err(ConversionError::as_target)?;
        if !from.is_compatible(to) {
            return Err(ConversionError::IncompatibleCategory {
                from: from.name.clone(),
                to: to.name.clone(),
                from_category: from.category,
                to_category: to.category,
            });
        }
        Ok((from, to))
    }
}

fn convert_between(value: &Number, from: &Unit, to: &Unit) -> Result<Number, ConversionError> {
    let base = from.to_base(value);
    Ok(to.from_base(&base)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DimensionCategory;
    use proptest::prelude::*;

    fn registry() -> UnitRegistry {
        UnitRegistry::builtin()
    }

    #[test]
    fn test_meter_to_kilometer_is_exact() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        assert_eq!(engine.convert(100.0, "meter", "kilometer").unwrap(), 0.1);
    }

    #[test]
    fn test_freezing_point() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        assert_eq!(engine.convert(32.0, "fahrenheit", "celsius").unwrap(), 0.0);
        assert_eq!(engine.convert(212.0, "F", "C").unwrap(), 100.0);
        assert_eq!(engine.convert(-40.0, "celsius", "fahrenheit").unwrap(), -40.0);
        assert_eq!(engine.convert(0.0, "celsius", "kelvin").unwrap(), 273.15);
    }

    #[test]
    fn test_hour_to_minute() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        assert_eq!(engine.convert(1.0, "hour", "minute").unwrap(), 60.0);
        assert_eq!(engine.convert(1.0, "day", "s").unwrap(), 86_400.0);
    }

    #[test]
    fn test_kilometer_to_mile() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        let miles = engine.convert(5.0, "kilometer", "mile").unwrap();
        assert!((miles - 3.106855).abs() < 1e-6);
    }

    #[test]
    fn test_kilogram_to_pound() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        let pounds = engine.convert(1.0, "kilogram", "pound").unwrap();
        assert!((pounds - 2.20462).abs() < 1e-5);
    }

    #[test]
    fn test_speed_and_volume() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        assert_eq!(engine.convert(36.0, "km/h", "m/s").unwrap(), 10.0);
        let kph = engine.convert(1.0, "kilometer_per_hour", "meter_per_second").unwrap();
        assert!((kph - 0.277778).abs() < 1e-6);
        assert_eq!(engine.convert(1.0, "liter", "milliliter").unwrap(), 1000.0);
        assert_eq!(engine.convert(1.0, "mph", "kph").unwrap(), 1.609344);
    }

    #[test]
    fn test_unknown_source_and_target() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        match engine.convert(1.0, "furlong", "meter") {
            Err(ConversionError::UnknownSource { unit, .. }) => assert_eq!(unit, "furlong"),
            other => panic!("expected UnknownSource, got {:?}", other),
        }
        match engine.convert(1.0, "meter", "cubit") {
            Err(ConversionError::UnknownTarget { unit, .. }) => assert_eq!(unit, "cubit"),
            other => panic!("expected UnknownTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_check_order() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        // Unknown name wins over everything else
        assert!(matches!(
            engine.convert(f64::NAN, "furlong", "kilogram"),
            Err(ConversionError::UnknownSource { .. })
        ));
        // Category mismatch wins over a bad value
        assert!(matches!(
            engine.convert(f64::NAN, "meter", "kilogram"),
            Err(ConversionError::IncompatibleCategory { .. })
        ));
        assert!(matches!(
            engine.convert(f64::INFINITY, "meter", "foot"),
            Err(ConversionError::NonFinite(_))
        ));
    }

    #[test]
    fn test_result_beyond_f64_range() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        assert!(matches!(
            engine.convert(1e308, "kilometer", "millimeter"),
            Err(ConversionError::OutOfRange { .. })
        ));
        assert!(matches!(
            engine.convert(-f64::MAX, "mile", "inch"),
            Err(ConversionError::OutOfRange { .. })
        ));
        // Shrinking toward the limit stays finite
        assert_eq!(engine.convert(1e308, "millimeter", "meter").unwrap(), 1e305);
        let exact = engine
            .convert_exact(&Number::from_f64(1e308).unwrap(), "kilometer", "millimeter")
            .unwrap();
        assert_eq!(exact, Number::from_str("1e314").unwrap());
    }

    #[test]
    fn test_every_cross_category_pair_fails() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        for from in reg.units() {
            for to in reg.units() {
                let result = engine.convert(1.0, &from.name, &to.name);
                if from.category == to.category {
                    assert!(result.is_ok(), "{} -> {}", from.name, to.name);
                } else {
                    assert!(
                        matches!(result, Err(ConversionError::IncompatibleCategory { .. })),
                        "{} -> {} should be incompatible",
                        from.name,
                        to.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_convert_exact() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        let third_of_mile = Number::from_ratio(1, 3).unwrap();
        let feet = engine.convert_exact(&third_of_mile, "mile", "foot").unwrap();
        assert_eq!(feet, Number::from_i64(1760));
    }

    #[test]
    fn test_convert_quantity() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        let q = engine.to_base(&Number::from_i64(2), "hours").unwrap();
        assert_eq!(q.unit.name, "second");
        assert_eq!(q.value, Number::from_i64(7200));

        let minutes = engine.convert_quantity(&q, "min").unwrap();
        assert_eq!(minutes.value, Number::from_i64(120));
        assert!(matches!(
            engine.convert_quantity(&q, "lightyear"),
            Err(ConversionError::UnknownTarget { .. })
        ));
    }

    #[test]
    fn test_to_base_temperature() {
        let reg = registry();
        let engine = ConversionEngine::new(&reg);
        let q = engine.to_base(&Number::from_i64(100), "celsius").unwrap();
        assert_eq!(q.category(), DimensionCategory::Temperature);
        assert_eq!(q.value, Number::from_str("373.15").unwrap());
    }

    fn same_category_pair() -> impl Strategy<Value = (String, String)> {
        let reg = UnitRegistry::builtin();
        let pairs: Vec<(String, String)> = reg
            .units()
            .flat_map(|a| {
                reg.units_in(a.category)
                    .into_iter()
                    .map(move |b| (a.name.clone(), b.name.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        proptest::sample::select(pairs)
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_tolerance(
            (a, b) in same_category_pair(),
            value in -1.0e6f64..1.0e6f64,
        ) {
            let reg = registry();
            let engine = ConversionEngine::new(&reg);
            let there = engine.convert(value, &a, &b).unwrap();
            let back = engine.convert(there, &b, &a).unwrap();
            let tolerance = 1e-9 * value.abs().max(1.0);
            prop_assert!((back - value).abs() <= tolerance, "{} {} -> {} -> {}", value, a, b, back);
        }
    }
}
