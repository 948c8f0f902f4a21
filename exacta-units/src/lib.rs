//! Exacta Units - category-checked unit conversion
//!
//! Units carry an exact affine transform to the base unit of their
//! category. Conversion goes source -> base -> target in exact rational
//! arithmetic and refuses to mix categories.
//!
//! Categories:
//! - Length (meter, km, mi, ft, in, yd, ...)
//! - Mass (kilogram, g, lb)
//! - Time (second, min, h, d)
//! - Temperature (kelvin, C, F)
//! - Volume (liter, mL, qt)
//! - Speed (m/s, km/h, mph)

mod dimension;
mod unit;
mod error;
mod quantity;
mod units;
mod convert;

pub use dimension::DimensionCategory;
pub use unit::Unit;
pub use error::{ConversionError, RegistryError};
pub use quantity::Quantity;
pub use units::{normalize_unit_name, UnitRegistry, UnitRegistryBuilder};
pub use convert::ConversionEngine;
