//! Exact fractions from decimal text
//!
//! The literal is read through its digit structure, so `0.1` is exactly
//! 1/10 and a 200-digit decimal stays exact.

use exacta_core::{Fraction, Number, NumberError};
use tracing::debug;
use crate::FractionError;

/// Default cap on literal length
pub const DEFAULT_MAX_INPUT_LEN: usize = 10_000;

#[derive(Debug, Clone, Copy)]
pub struct RationalReconstructor {
    max_input_len: usize,
}

impl Default for RationalReconstructor {
    fn default() -> Self {
        RationalReconstructor { max_input_len: DEFAULT_MAX_INPUT_LEN }
    }
}

impl RationalReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    /// Exact reduced fraction of a decimal, integer or `a/b` literal
    pub fn reconstruct(&self, literal: &str) -> Result<Fraction, FractionError> {
        let actual = literal.len();
        if actual > self.max_input_len {
            return Err(FractionError::LimitExceeded { limit: self.max_input_len, actual });
        }
        let number = Number::from_str(literal).map_err(|e| match e {
            NumberError::ParseError(_) => FractionError::Parse(literal.to_string()),
            NumberError::DivisionByZero => FractionError::DivisionByZero,
            other => FractionError::Number(other),
        })?;
        let fraction = number.to_fraction();
        debug!(literal, fraction = %fraction, "reconstructed");
        Ok(fraction)
    }

    /// Always `n/d`, even when `d` is 1
    pub fn to_fraction(&self, literal: &str) -> Result<String, FractionError> {
        Ok(self.reconstruct(literal)?.to_string())
    }

    /// Closest fraction with denominator at most `max_denominator`
    pub fn approximate(&self, literal: &str, max_denominator: u64) -> Result<Fraction, FractionError> {
        Ok(self.reconstruct(literal)?.limit_denominator(max_denominator))
    }
}
