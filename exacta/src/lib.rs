//! Exacta - exact unit conversion and fractions
//!
//! `Exacta` bundles the unit registry, the fraction engines and the
//! algebra backend behind three operations:
//!
//! - `convert_unit(100.0, "meter", "kilometer")` gives `0.1`
//! - `to_fraction("0.75")` gives `"3/4"`
//! - `simplify_fraction("(x^2 - 4)/(x - 2)")` gives `"x + 2"`
//!
//! The value is immutable after construction and can be shared across
//! threads through `Arc`.

mod config;
mod request;

pub use config::EngineConfig;
pub use request::Request;

pub use exacta_core::{ErrorKind, ExactError, Fraction, ResultFormatter, Value};
pub use exacta_rational::{Factorization, Factorizer};
pub use exacta_units::{DimensionCategory, UnitRegistry};

use exacta_poly::PolynomialFactorizer;
use exacta_rational::{FractionSimplifier, RationalReconstructor};
use exacta_units::ConversionEngine;
use std::sync::Arc;
use tracing::instrument;

/// Main Exacta engine
#[derive(Debug, Clone)]
pub struct Exacta {
    registry: Arc<UnitRegistry>,
    reconstructor: RationalReconstructor,
    simplifier: FractionSimplifier,
    config: EngineConfig,
}

impl Exacta {
    pub fn new(config: EngineConfig) -> Self {
        let factorizer = PolynomialFactorizer::new()
            .with_max_degree(config.max_degree)
            .with_max_root_candidates(config.max_root_candidates)
            .with_max_depth(config.max_depth)
            .with_max_coefficient_bits(config.max_coefficient_bits);
        Self {
            registry: Arc::new(UnitRegistry::builtin()),
            reconstructor: RationalReconstructor::new().with_max_input_len(config.max_input_len),
            simplifier: FractionSimplifier::new(Arc::new(factorizer)).with_max_input_len(config.max_input_len),
            config,
        }
    }

    /// Load configuration from JSON and build the engine
    pub fn from_json_config(json: &str) -> Result<Self, ExactError> {
        Ok(Self::new(EngineConfig::from_json(json)?))
    }

    pub fn with_registry(mut self, registry: Arc<UnitRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the algebra backend used by `simplify_fraction`
    pub fn with_factorizer(mut self, factorizer: Arc<dyn Factorizer>) -> Self {
        self.simplifier = FractionSimplifier::new(factorizer).with_max_input_len(self.config.max_input_len);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Convert `value` from one unit to another of the same category
    #[instrument(level = "debug", skip(self))]
    pub fn convert_unit(&self, value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ExactError> {
        Ok(ConversionEngine::new(&self.registry).convert(value, from_unit, to_unit)?)
    }

    /// Exact fraction of a decimal literal, always `n/d`
    #[instrument(level = "debug", skip(self))]
    pub fn to_fraction(&self, value: &str) -> Result<String, ExactError> {
        Ok(self.reconstructor.to_fraction(value)?)
    }

    /// Reduce a numeric or polynomial ratio to lowest terms
    #[instrument(level = "debug", skip(self))]
    pub fn simplify_fraction(&self, fraction: &str) -> Result<String, ExactError> {
        Ok(self.simplifier.simplify(fraction)?)
    }

    /// Closest fraction to `value` whose denominator is at most
    /// `max_denominator` (the configured default when `None`)
    #[instrument(level = "debug", skip(self))]
    pub fn approximate_fraction(&self, value: &str, max_denominator: Option<u64>) -> Result<Fraction, ExactError> {
        let limit = max_denominator.unwrap_or(self.config.default_max_denominator);
        if limit == 0 {
            return Err(ExactError::parse_error("max_denominator must be positive"));
        }
        Ok(self.reconstructor.approximate(value, limit)?)
    }

    /// Run one request. Never panics; failures come back as `Value::Error`.
    pub fn handle(&self, request: &Request) -> Value {
        let result = match request {
            Request::ConvertUnit { value, from_unit, to_unit } => {
                self.convert_unit(*value, from_unit, to_unit).map(Value::Number)
            }
            Request::ToFraction { value } => self
                .reconstructor
                .reconstruct(value)
                .map(Value::Fraction)
                .map_err(ExactError::from),
            Request::SimplifyFraction { fraction } => self.simplify_fraction(fraction).map(Value::Expression),
            Request::ApproximateFraction { value, max_denominator } => {
                self.approximate_fraction(value, *max_denominator).map(Value::Fraction)
            }
        };
        result.unwrap_or_else(Value::Error)
    }

    /// Run a request given as JSON text; malformed requests are parse errors
    pub fn handle_json(&self, json: &str) -> Value {
        match serde_json::from_str::<Request>(json) {
            Ok(request) => self.handle(&request),
            Err(e) => Value::Error(ExactError::parse_error(format!("invalid request: {}", e))),
        }
    }
}

impl Default for Exacta {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
