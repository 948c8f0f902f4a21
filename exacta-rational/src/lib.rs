//! Exacta Rational - exact fractions
//!
//! - `RationalReconstructor`: decimal text to an exact reduced fraction
//! - `FractionSimplifier`: numeric and polynomial ratios to lowest terms
//! - `Factorizer`: the algebra backend the simplifier delegates to

mod algebra;
mod error;
mod literal;
mod reconstruct;
mod simplify;

pub use algebra::{AlgebraError, Factor, Factorization, Factorizer};
pub use error::FractionError;
pub use literal::FractionInput;
pub use reconstruct::{RationalReconstructor, DEFAULT_MAX_INPUT_LEN};
pub use simplify::FractionSimplifier;
