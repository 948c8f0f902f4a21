//! Result values crossing the Exacta boundary
//!
//! Every operation produces exactly one `Value`. Errors are values too,
//! so the boundary never throws.

use crate::{ExactError, Fraction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// Result of a unit conversion
    Number(f64),
    /// Exact fraction, always `n/d`
    Fraction(Fraction),
    /// Simplified ratio text, numeric (`3/4`) or symbolic (`x + 2`)
    Expression(String),
    Error(ExactError),
}

impl Value {
    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_fraction(&self) -> Option<&Fraction> {
        match self {
            Value::Fraction(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&str> {
        match self {
            Value::Expression(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ExactError> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Fraction(_) => "Fraction",
            Value::Expression(_) => "Expression",
            Value::Error(_) => "Error",
        }
    }
}

impl From<ExactError> for Value {
    fn from(e: ExactError) -> Self {
        Value::Error(e)
    }
}

impl From<Fraction> for Value {
    fn from(f: Fraction) -> Self {
        Value::Fraction(f)
    }
}
