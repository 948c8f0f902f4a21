//! Fraction simplification, numeric and polynomial
//!
//! Numeric ratios reduce by GCD. Polynomial ratios go through the
//! injected `Factorizer`: both sides are factored, common factors cancel
//! as a multiset keyed by canonical factor text, and what is left is
//! rendered deterministically.
//!
//! Cancelling `(x - 2)` from `(x^2 - 4)/(x - 2)` drops the point `x = 2`
//! from the excluded domain. The result does not report it.

use std::collections::BTreeMap;
use std::sync::Arc;
use dashu_int::{IBig, UBig};
use exacta_core::Number;
use tracing::{debug, warn};
use crate::{Factorization, Factorizer, FractionError, FractionInput};
use crate::reconstruct::DEFAULT_MAX_INPUT_LEN;

/// Factor text -> multiplicity, ordered by text
type FactorBag = BTreeMap<String, u32>;

#[derive(Clone)]
pub struct FractionSimplifier {
    factorizer: Arc<dyn Factorizer>,
    max_input_len: usize,
}

impl std::fmt::Debug for FractionSimplifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FractionSimplifier")
            .field("max_input_len", &self.max_input_len)
            .finish_non_exhaustive()
    }
}

impl FractionSimplifier {
    pub fn new(factorizer: Arc<dyn Factorizer>) -> Self {
        FractionSimplifier { factorizer, max_input_len: DEFAULT_MAX_INPUT_LEN }
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    /// Simplify `fraction` to lowest terms.
    ///
    /// Numeric results render as `n` or `n/d`; symbolic ones as e.g.
    /// `x + 2`, `(x + 1)/(x - 1)` or `-1/(x + 2)`.
    pub fn simplify(&self, fraction: &str) -> Result<String, FractionError> {
        let actual = fraction.len();
        if actual > self.max_input_len {
            return Err(FractionError::LimitExceeded { limit: self.max_input_len, actual });
        }

        let result = match FractionInput::classify(fraction)? {
            FractionInput::Integer(n) => n.to_string(),
            FractionInput::Decimal(n) => n.to_fraction().to_reduced_string(),
            FractionInput::Ratio { numerator, denominator } => {
                let reduced = numerator
                    .checked_div(&denominator)
                    .map_err(|_| FractionError::DivisionByZero)?;
                reduced.to_fraction().to_reduced_string()
            }
            FractionInput::Symbolic { numerator, denominator } => {
                self.simplify_symbolic(&numerator, &denominator)?
            }
        };
        debug!(input = fraction, result = %result, "simplified");
        Ok(result)
    }

    fn simplify_symbolic(&self, numerator: &str, denominator: &str) -> Result<String, FractionError> {
        let top = self.factor(numerator)?;
        let bottom = self.factor(denominator)?;

        if bottom.is_zero() {
            return Err(FractionError::DivisionByZero);
        }
        if top.is_zero() {
            return Ok("0".to_string());
        }

        let mut top_bag = bag(&top);
        let mut bottom_bag = bag(&bottom);
        cancel(&mut top_bag, &mut bottom_bag);

        let coefficient = top.coefficient.checked_div(&bottom.coefficient)?;
        Ok(render_ratio(&coefficient, &top_bag, &bottom_bag))
    }

    fn factor(&self, expression: &str) -> Result<Factorization, FractionError> {
        self.factorizer.factor(expression).map_err(|e| {
            warn!(expression, error = %e, "factorization failed");
            FractionError::Algebra(e)
        })
    }
}

fn bag(factorization: &Factorization) -> FactorBag {
    let mut bag = FactorBag::new();
    for factor in &factorization.factors {
        if factor.multiplicity > 0 {
            *bag.entry(factor.expression.clone()).or_insert(0) += factor.multiplicity;
        }
    }
    bag
}

/// Remove the multiset intersection from both sides
fn cancel(top: &mut FactorBag, bottom: &mut FactorBag) {
    for (expression, top_count) in top.iter_mut() {
        if let Some(bottom_count) = bottom.get_mut(expression) {
            let common = (*top_count).min(*bottom_count);
            *top_count -= common;
            *bottom_count -= common;
        }
    }
    top.retain(|_, count| *count > 0);
    bottom.retain(|_, count| *count > 0);
}

/// A factor text is atomic when it needs no parentheses next to `*` or `^`
fn is_atomic(expression: &str) -> bool {
    expression.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// A sum renders with spaces around its binary operators
fn is_sum(expression: &str) -> bool {
    expression.contains(' ')
}

fn render_power(expression: &str, multiplicity: u32) -> String {
    let base = if is_atomic(expression) {
        expression.to_string()
    } else {
        format!("({})", expression)
    };
    if multiplicity == 1 {
        base
    } else {
        format!("{}^{}", base, multiplicity)
    }
}

/// `scalar * factors`, with the leading `1*` dropped and `-1*` as `-`.
///
/// A lone sum with scalar 1 stays bare (`x + 2`); everywhere else it is
/// parenthesized.
fn render_product(scalar: &IBig, factors: &FactorBag) -> String {
    if factors.is_empty() {
        return scalar.to_string();
    }
    if *scalar == IBig::ONE && factors.len() == 1 {
        if let Some((expression, &1)) = factors.iter().next() {
            return expression.clone();
        }
    }
    let body = factors
        .iter()
        .map(|(expression, &m)| render_power(expression, m))
        .collect::<Vec<_>>()
        .join("*");
    if *scalar == IBig::ONE {
        body
    } else if *scalar == IBig::NEG_ONE {
        format!("-{}", body)
    } else {
        format!("{}*{}", scalar, body)
    }
}

fn render_ratio(coefficient: &Number, top: &FactorBag, bottom: &FactorBag) -> String {
    let numerator = coefficient.numerator();
    let denominator = IBig::from(coefficient.denominator().clone());

    let top_text = render_product(numerator, top);
    if bottom.is_empty() && *coefficient.denominator() == UBig::ONE {
        return top_text;
    }

    let top_text = if *numerator == IBig::ONE && top.len() == 1 && top.values().all(|&m| m == 1)
        && top.keys().all(|e| is_sum(e))
    {
        format!("({})", top_text)
    } else {
        top_text
    };

    let bottom_text = match bottom.iter().next() {
        None => denominator.to_string(),
        Some((expression, &m)) if bottom.len() == 1 && denominator == IBig::ONE => {
            render_power(expression, m)
        }
        Some(_) => format!("({})", render_product(&denominator, bottom)),
    };

    format!("{}/{}", top_text, bottom_text)
}
