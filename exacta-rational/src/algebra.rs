//! The algebra collaborator seam
//!
//! Symbolic simplification needs someone to factor polynomials. That
//! someone is injected as a `Factorizer`; the simplifier only ever sees
//! the canonical factor texts it hands back.

use exacta_core::Number;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by an algebra backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    #[error("cannot parse expression: {0}")]
    Parse(String),

    #[error("unsupported expression: {0}")]
    Unsupported(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

/// One irreducible factor raised to a power.
///
/// `expression` is canonical: two factors denote the same polynomial
/// exactly when their texts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Factor {
    pub expression: String,
    pub multiplicity: u32,
}

impl Factor {
    pub fn new(expression: impl Into<String>, multiplicity: u32) -> Self {
        Factor { expression: expression.into(), multiplicity }
    }
}

/// `coefficient * product(factor ^ multiplicity)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factorization {
    pub coefficient: Number,
    pub factors: Vec<Factor>,
}

impl Factorization {
    /// A constant with no polynomial factors
    pub fn constant(coefficient: Number) -> Self {
        Factorization { coefficient, factors: Vec::new() }
    }

    pub fn with_factor(mut self, expression: impl Into<String>, multiplicity: u32) -> Self {
        self.factors.push(Factor::new(expression, multiplicity));
        self
    }

    /// The zero polynomial
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }
}

/// Factors a polynomial expression over the rationals
pub trait Factorizer: Send + Sync {
    fn factor(&self, expression: &str) -> Result<Factorization, AlgebraError>;
}
