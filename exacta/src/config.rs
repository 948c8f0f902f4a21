//! Engine configuration

use exacta_core::ExactError;
use exacta_poly::{
    DEFAULT_MAX_COEFFICIENT_BITS, DEFAULT_MAX_DEGREE, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ROOT_CANDIDATES,
};
use exacta_rational::DEFAULT_MAX_INPUT_LEN;
use serde::{Deserialize, Serialize};

/// Resource guards and defaults; every field may be omitted in JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Longest literal or expression accepted, in bytes
    pub max_input_len: usize,
    /// Highest polynomial degree the built-in factorizer expands to
    pub max_degree: usize,
    /// Rational-root candidates tried per polynomial before giving up
    pub max_root_candidates: usize,
    /// Deepest nesting of parentheses, signs and operator chains
    pub max_depth: usize,
    /// Largest expanded coefficient, in bits
    pub max_coefficient_bits: usize,
    /// Denominator bound for `approximate_fraction` when none is given
    pub default_max_denominator: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_degree: DEFAULT_MAX_DEGREE,
            max_root_candidates: DEFAULT_MAX_ROOT_CANDIDATES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_coefficient_bits: DEFAULT_MAX_COEFFICIENT_BITS,
            default_max_denominator: 1_000_000,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    pub fn with_max_degree(mut self, max_degree: usize) -> Self {
        self.max_degree = max_degree;
        self
    }

    pub fn with_max_root_candidates(mut self, max_root_candidates: usize) -> Self {
        self.max_root_candidates = max_root_candidates;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_coefficient_bits(mut self, max_coefficient_bits: usize) -> Self {
        self.max_coefficient_bits = max_coefficient_bits;
        self
    }

    pub fn with_default_max_denominator(mut self, default_max_denominator: u64) -> Self {
        self.default_max_denominator = default_max_denominator;
        self
    }

    /// Load from a JSON object, then validate
    pub fn from_json(json: &str) -> Result<Self, ExactError> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| ExactError::parse_error(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ExactError> {
        if self.max_input_len == 0 {
            return Err(ExactError::parse_error("invalid configuration: max_input_len must be positive"));
        }
        if self.max_depth == 0 {
            return Err(ExactError::parse_error("invalid configuration: max_depth must be positive"));
        }
        if self.default_max_denominator == 0 {
            return Err(ExactError::parse_error(
                "invalid configuration: default_max_denominator must be positive",
            ));
        }
        Ok(())
    }
}
