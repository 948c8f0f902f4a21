//! Exacta Poly - the built-in algebra backend
//!
//! Parses single-variable polynomial expressions, expands them exactly and
//! factors them over the rationals. `PolynomialFactorizer` plugs into
//! `exacta_rational::FractionSimplifier`.

mod factor;
mod parser;
mod poly;

pub use exacta_rational::AlgebraError;
pub use factor::{
    PolynomialFactorizer, DEFAULT_MAX_COEFFICIENT_BITS, DEFAULT_MAX_DEGREE, DEFAULT_MAX_ROOT_CANDIDATES,
};
pub use parser::{parse_expr, parse_expr_with_max_depth, BinOp, Expr, DEFAULT_MAX_DEPTH};
pub use poly::Poly;
