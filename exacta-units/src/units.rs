//! Unit registry: the built-in table plus validated custom registries
//!
//! A registry is an immutable value. Build it once, then share it by
//! reference or through an `Arc`.

use std::collections::HashMap;
use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use exacta_core::Number;
use crate::{ConversionError, DimensionCategory, RegistryError, Unit};

/// Normalize a unit token for lookup: trim, lowercase, spaces and hyphens
/// become underscores.
pub fn normalize_unit_name(token: &str) -> String {
    token
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Registry of known units
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: Vec<Unit>,
    /// Normalized alias -> index into `units`
    index: HashMap<String, usize>,
}

impl UnitRegistry {
    /// The built-in table: length, mass, time, temperature, volume, speed
    pub fn builtin() -> Self {
        let mut units = Vec::new();
        register_length_units(&mut units);
        register_mass_units(&mut units);
        register_time_units(&mut units);
        register_temperature_units(&mut units);
        register_volume_units(&mut units);
        register_speed_units(&mut units);
        Self::from_units(units)
    }

    pub fn builder() -> UnitRegistryBuilder {
        UnitRegistryBuilder::default()
    }

    fn from_units(units: Vec<Unit>) -> Self {
        let mut index = HashMap::new();
        for (i, unit) in units.iter().enumerate() {
            for alias in alias_keys(unit) {
                index.entry(alias).or_insert(i);
            }
        }
        UnitRegistry { units, index }
    }

    /// Look up a unit by name, symbol or alias (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.index.get(&normalize_unit_name(name)).map(|&i| &self.units[i])
    }

    /// Like `get`, but an unknown name is an error listing the supported units
    pub fn resolve(&self, name: &str) -> Result<&Unit, ConversionError> {
        self.get(name).ok_or_else(|| ConversionError::UnknownUnit {
            unit: name.to_string(),
            supported: self.canonical_names().into_iter().map(String::from).collect(),
        })
    }

    /// The scale-1, offset-0 unit of a category
    pub fn base_unit(&self, category: DimensionCategory) -> Option<&Unit> {
        self.units.iter().find(|u| u.category == category && u.is_base())
    }

    /// Units of one category, in registration order
    pub fn units_in(&self, category: DimensionCategory) -> Vec<&Unit> {
        self.units.iter().filter(|u| u.category == category).collect()
    }

    /// Categories that have at least one unit
    pub fn categories(&self) -> Vec<DimensionCategory> {
        DimensionCategory::ALL
            .into_iter()
            .filter(|c| self.units.iter().any(|u| u.category == *c))
            .collect()
    }

    /// Sorted canonical names
    pub fn canonical_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.iter().map(|u| u.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Whether two unit names share a category
    pub fn compatible(&self, a: &str, b: &str) -> Result<bool, ConversionError> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(a.is_compatible(b))
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for custom registries; `build` checks every registry invariant.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistryBuilder {
    units: Vec<Unit>,
}

impl UnitRegistryBuilder {
    pub fn unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn units(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.units.extend(units);
        self
    }

    pub fn build(self) -> Result<UnitRegistry, RegistryError> {
        let mut owners: HashMap<String, &str> = HashMap::new();
        let mut bases: HashMap<DimensionCategory, &str> = HashMap::new();

        for unit in &self.units {
            if normalize_unit_name(&unit.name).is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if unit.scale.is_zero() || unit.scale.is_negative() {
                return Err(RegistryError::NonPositiveScale {
                    unit: unit.name.clone(),
                    scale: unit.scale.to_string(),
                });
            }
            for alias in alias_keys(unit) {
                if let Some(first) = owners.insert(alias.clone(), &unit.name) {
                    return Err(RegistryError::DuplicateAlias {
                        alias,
                        first: first.to_string(),
                        second: unit.name.clone(),
                    });
                }
            }
            if unit.is_base() {
                if let Some(first) = bases.insert(unit.category, &unit.name) {
                    return Err(RegistryError::MultipleBase {
                        category: unit.category,
                        first: first.to_string(),
                        second: unit.name.clone(),
                    });
                }
            }
        }

        for unit in &self.units {
            if !bases.contains_key(&unit.category) {
                return Err(RegistryError::MissingBase(unit.category));
            }
        }

        Ok(UnitRegistry::from_units(self.units))
    }
}

/// Normalized lookup keys of a unit, canonical name first, deduplicated
fn alias_keys(unit: &Unit) -> Vec<String> {
    let mut keys = vec![normalize_unit_name(&unit.name)];
    for alias in &unit.aliases {
        let key = normalize_unit_name(alias);
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Exact `n/d` with a nonzero constant denominator
fn ratio(n: i64, d: u64) -> Number {
    Number::from_rbig(RBig::from_parts(IBig::from(n), UBig::from(d)))
}

fn int(n: i64) -> Number {
    Number::from_i64(n)
}

fn register_length_units(units: &mut Vec<Unit>) {
    use DimensionCategory::Length;
    units.push(Unit::new("meter", Length, int(1))
        .aliases(&["m", "meters", "metre", "metres"]));
    units.push(Unit::new("kilometer", Length, int(1000))
        .aliases(&["km", "kilometers", "kilometre", "kilometres"]));
    units.push(Unit::new("centimeter", Length, ratio(1, 100))
        .aliases(&["cm", "centimeters", "centimetre", "centimetres"]));
    units.push(Unit::new("millimeter", Length, ratio(1, 1000))
        .aliases(&["mm", "millimeters", "millimetre", "millimetres"]));
    units.push(Unit::new("mile", Length, ratio(1_609_344, 1000))
        .aliases(&["mi", "miles"]));
    units.push(Unit::new("foot", Length, ratio(3048, 10_000))
        .aliases(&["ft", "feet"]));
    units.push(Unit::new("inch", Length, ratio(254, 10_000))
        .aliases(&["in", "inches"]));
    units.push(Unit::new("yard", Length, ratio(9144, 10_000))
        .aliases(&["yd", "yards"]));
}

fn register_mass_units(units: &mut Vec<Unit>) {
    use DimensionCategory::Mass;
    units.push(Unit::new("kilogram", Mass, int(1))
        .aliases(&["kg", "kgs", "kilograms", "kilogramme", "kilogrammes", "kilo", "kilos"]));
    units.push(Unit::new("gram", Mass, ratio(1, 1000))
        .aliases(&["g", "grams", "gramme", "grammes"]));
    units.push(Unit::new("pound", Mass, ratio(45_359_237, 100_000_000))
        .aliases(&["lb", "lbs", "pounds"]));
}

fn register_time_units(units: &mut Vec<Unit>) {
    use DimensionCategory::Time;
    units.push(Unit::new("second", Time, int(1))
        .aliases(&["s", "sec", "secs", "seconds"]));
    units.push(Unit::new("minute", Time, int(60))
        .aliases(&["min", "mins", "minutes"]));
    units.push(Unit::new("hour", Time, int(3600))
        .aliases(&["h", "hr", "hrs", "hours"]));
    units.push(Unit::new("day", Time, int(86_400))
        .aliases(&["d", "days"]));
}

fn register_temperature_units(units: &mut Vec<Unit>) {
    use DimensionCategory::Temperature;
    let absolute_zero_offset = ratio(27_315, 100);
    units.push(Unit::new("kelvin", Temperature, int(1))
        .aliases(&["K", "kelvins", "degree kelvin", "degrees kelvin"]));
    units.push(Unit::with_offset("celsius", Temperature, int(1), absolute_zero_offset.clone())
        .aliases(&["C", "degC", "°C", "degree celsius", "degrees celsius", "centigrade"]));
    // One affine step: 5/9 * F + (273.15 - 32 * 5/9)
    units.push(Unit::with_offset(
        "fahrenheit",
        Temperature,
        ratio(5, 9),
        absolute_zero_offset.sub(&ratio(160, 9)),
    )
    .aliases(&["F", "degF", "°F", "degree fahrenheit", "degrees fahrenheit"]));
}

fn register_volume_units(units: &mut Vec<Unit>) {
    use DimensionCategory::Volume;
    units.push(Unit::new("liter", Volume, int(1))
        .aliases(&["L", "l", "liters", "litre", "litres"]));
    units.push(Unit::new("milliliter", Volume, ratio(1, 1000))
        .aliases(&["mL", "ml", "milliliters", "millilitre", "millilitres"]));
    units.push(Unit::new("quart", Volume, ratio(946_352_946, 1_000_000_000))
        .aliases(&["qt", "quarts"]));
}

fn register_speed_units(units: &mut Vec<Unit>) {
    use DimensionCategory::Speed;
    units.push(Unit::new("meter_per_second", Speed, int(1))
        .aliases(&["m/s", "mps", "meters per second", "metre per second", "metres per second"]));
    units.push(Unit::new("kilometer_per_hour", Speed, ratio(1000, 3600))
        .aliases(&["km/h", "kph", "kmh", "kilometers per hour", "kilometre per hour", "kilometres per hour"]));
    units.push(Unit::new("mile_per_hour", Speed, ratio(44_704, 100_000))
        .aliases(&["mph", "mi/h", "miles per hour"]));
}
