//! Conversion and registry errors

use exacta_core::{ExactError, ErrorKind, NumberError};
use thiserror::Error;
use crate::DimensionCategory;

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Name does not resolve; `supported` lists the canonical names
    #[error("unknown unit: {unit}")]
    UnknownUnit { unit: String, supported: Vec<String> },

    #[error("unknown source unit: {unit}")]
    UnknownSource { unit: String, supported: Vec<String> },

    #[error("unknown target unit: {unit}")]
    UnknownTarget { unit: String, supported: Vec<String> },

    #[error("cannot convert {from} ({from_category}) to {to} ({to_category})")]
    IncompatibleCategory {
        from: String,
        to: String,
        from_category: DimensionCategory,
        to_category: DimensionCategory,
    },

    #[error("value must be finite, got {0}")]
    NonFinite(f64),

    /// The exact result does not fit in an f64
    #[error("converting {value} {from} to {to} is out of range")]
    OutOfRange { value: f64, from: String, to: String },

    #[error("numeric error: {0}")]
    Number(#[from] NumberError),
}

impl ConversionError {
    /// Re-tag an unresolved name as the source side of a conversion
    pub(crate) fn as_source(self) -> Self {
        match self {
            ConversionError::UnknownUnit { unit, supported } => {
                ConversionError::UnknownSource { unit, supported }
            }
            other => other,
        }
    }

    /// Re-tag an unresolved name as the target side of a conversion
    pub(crate) fn as_target(self) -> Self {
        match self {
            ConversionError::UnknownUnit { unit, supported } => {
                ConversionError::UnknownTarget { unit, supported }
            }
            other => other,
        }
    }
}

impl From<ConversionError> for ExactError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownUnit { ref supported, .. }
            | ConversionError::UnknownSource { ref supported, .. }
            | ConversionError::UnknownTarget { ref supported, .. } => {
                let suggestion = format!("Supported units: {}", supported.join(", "));
                ExactError::new(ErrorKind::UnknownUnit, err.to_string()).with_suggestion(suggestion)
            }
            ConversionError::IncompatibleCategory { from, to, from_category, to_category } => {
                ExactError::incompatible_category(&from, from_category.name(), &to, to_category.name())
            }
            ConversionError::NonFinite(v) => ExactError::non_finite(v),
            e @ ConversionError::OutOfRange { .. } => {
                ExactError::new(ErrorKind::NonFiniteInput, e.to_string())
                    .with_suggestion("Convert a smaller value or use exact conversion")
            }
            ConversionError::Number(e) => e.into(),
        }
    }
}

/// Invariant violations found while building a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unit name must not be empty")]
    EmptyName,

    #[error("unit '{unit}' must have a positive scale, got {scale}")]
    NonPositiveScale { unit: String, scale: String },

    #[error("alias '{alias}' is claimed by both '{first}' and '{second}'")]
    DuplicateAlias { alias: String, first: String, second: String },

    #[error("category {0} has no base unit (scale 1, offset 0)")]
    MissingBase(DimensionCategory),

    #[error("category {category} has two base units: '{first}' and '{second}'")]
    MultipleBase { category: DimensionCategory, first: String, second: String },
}
