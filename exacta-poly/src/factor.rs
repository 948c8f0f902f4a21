//! Polynomial factoring over the rationals
//!
//! 1. Expand the expression into a dense polynomial in its one variable.
//! 2. Square-free decomposition (Yun) separates repeated factors.
//! 3. Each square-free part sheds its rational roots as primitive linear
//!    factors `q*x - p`; whatever is left stays as one factor.
//!
//! Factors are primitive integer polynomials with a positive leading
//! coefficient, rendered in descending order, so equal polynomials always
//! produce equal text. Irreducible parts of degree two or more without
//! rational roots are not split further.

use std::collections::BTreeMap;
use dashu_base::UnsignedAbs;
use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use exacta_core::{parse_decimal, Number};
use exacta_rational::{AlgebraError, Factorization, Factorizer};
use tracing::debug;
use crate::parser::{parse_expr_with_max_depth, BinOp, Expr, DEFAULT_MAX_DEPTH};
use crate::poly::Poly;

/// Default highest degree accepted for any intermediate polynomial
pub const DEFAULT_MAX_DEGREE: usize = 64;

/// Default cap on rational-root candidates tried per polynomial
pub const DEFAULT_MAX_ROOT_CANDIDATES: usize = 2_000;

/// Default cap on the size of any expanded coefficient
pub const DEFAULT_MAX_COEFFICIENT_BITS: usize = 8_192;

/// Coefficients beyond this magnitude skip divisor enumeration
const MAX_DIVISOR_SEARCH: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, Copy)]
pub struct PolynomialFactorizer {
    max_degree: usize,
    max_root_candidates: usize,
    max_depth: usize,
    max_coefficient_bits: usize,
}

impl Default for PolynomialFactorizer {
    fn default() -> Self {
        PolynomialFactorizer {
            max_degree: DEFAULT_MAX_DEGREE,
            max_root_candidates: DEFAULT_MAX_ROOT_CANDIDATES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_coefficient_bits: DEFAULT_MAX_COEFFICIENT_BITS,
        }
    }
}

impl PolynomialFactorizer {
    pub fn new() -> Self {
        Self::default()
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

    /// Parse and expand `expression` into a polynomial and its variable name
    pub fn expand(&self, expression: &str) -> Result<(Poly, Option<String>), AlgebraError> {
        let expr = parse_expr_with_max_depth(expression, self.max_depth)?;
        let mut var = None;
        let poly = self.expand_expr(&expr, &mut var)?;
        Ok((poly, var))
    }

    fn expand_expr(&self, expr: &Expr, var: &mut Option<String>) -> Result<Poly, AlgebraError> {
        match expr {
            Expr::Number(text) => {
                let value = parse_decimal(text).map_err(|e| AlgebraError::Parse(e.to_string()))?;
                self.check_size(Poly::constant(value))
            }
            Expr::Variable(name) => {
                match var {
                    Some(existing) if existing != name => {
                        return Err(AlgebraError::Unsupported(format!(
                            "more than one variable ({}, {})",
                            existing, name
                        )));
                    }
                    Some(_) => {}
                    None => *var = Some(name.clone()),
                }
                Ok(Poly::x())
            }
            Expr::Neg(inner) => Ok(self.expand_expr(inner, var)?.neg()),
            Expr::BinaryOp(left, op, right) => {
                let l = self.expand_expr(left, var)?;
                let r = self.expand_expr(right, var)?;
                match op {
                    BinOp::Add => Ok(l.add(&r)),
                    BinOp::Sub => Ok(l.sub(&r)),
                    BinOp::Mul => {
                        if !l.is_zero() && !r.is_zero() {
                            self.check_degree(l.degree() + r.degree())?;
                        }
                        self.check_size(l.mul(&r))
                    }
                    BinOp::Div => match r.as_constant() {
                        Some(c) if c.is_zero() => {
                            Err(AlgebraError::Unsupported("division by zero".to_string()))
                        }
                        Some(c) => self.check_size(l.scale(&(RBig::ONE / c))),
                        None => Err(AlgebraError::Unsupported(
                            "division by a non-constant expression".to_string(),
                        )),
                    },
                    BinOp::Pow => {
                        let exponent = self.exponent(&r)?;
                        self.check_degree(l.degree().saturating_mul(exponent))?;
                        let mut result = Poly::constant(RBig::ONE);
                        for _ in 0..exponent {
                            result = self.check_size(result.mul(&l))?;
                        }
                        Ok(result)
                    }
                }
            }
        }
    }

    /// Exponents must be constant non-negative integers
    fn exponent(&self, r: &Poly) -> Result<usize, AlgebraError> {
        let c = r
            .as_constant()
            .ok_or_else(|| AlgebraError::Unsupported("variable exponent".to_string()))?;
        if !c.is_int() || *c.numerator() < IBig::ZERO {
            return Err(AlgebraError::Unsupported(format!("exponent {} is not a non-negative integer", c)));
        }
        let magnitude = c.numerator().unsigned_abs();
        let exponent = u64::try_from(&magnitude)
            .ok()
            .and_then(|e| usize::try_from(e).ok())
            .filter(|e| *e <= self.max_degree)
            .ok_or_else(|| AlgebraError::LimitExceeded(format!("exponent {} exceeds {}", c, self.max_degree)))?;
        Ok(exponent)
    }

    fn check_degree(&self, degree: usize) -> Result<(), AlgebraError> {
        if degree > self.max_degree {
            return Err(AlgebraError::LimitExceeded(format!(
                "degree {} exceeds {}",
                degree, self.max_degree
            )));
        }
        Ok(())
    }

    fn check_size(&self, poly: Poly) -> Result<Poly, AlgebraError> {
        let bits = poly.max_bits();
        if bits > self.max_coefficient_bits {
            return Err(AlgebraError::LimitExceeded(format!(
                "coefficient of {} bits exceeds {}",
                bits, self.max_coefficient_bits
            )));
        }
        Ok(poly)
    }

    /// Factor an expanded polynomial
    pub fn factor_poly(&self, poly: &Poly, var: &str) -> Factorization {
        if poly.is_zero() {
            return Factorization::constant(Number::from_i64(0));
        }
        if poly.is_constant() {
            return Factorization::constant(Number::from_rbig(poly.leading()));
        }

        // Factor text -> (primitive coefficients, multiplicity)
        let mut found: BTreeMap<String, (Vec<IBig>, u32)> = BTreeMap::new();
        for (part, multiplicity) in square_free_parts(poly) {
            let (_, ints) = part.primitive_part();
            for factor in self.split_rational_roots(ints) {
                let text = Poly::render_integers(&factor, var);
                let entry = found.entry(text).or_insert_with(|| (factor, 0));
                entry.1 += multiplicity;
            }
        }

        // poly = coefficient * prod(factor^m), so compare leading terms
        let mut leading_product = RBig::ONE;
        for (ints, m) in found.values() {
            let lead = RBig::from(ints.last().cloned().unwrap_or(IBig::ONE));
            for _ in 0..*m {
                leading_product = &leading_product * &lead;
            }
        }
        let coefficient = poly.leading() / leading_product;

        let mut factorization = Factorization::constant(Number::from_rbig(coefficient));
        for (text, (_, m)) in found {
            factorization = factorization.with_factor(text, m);
        }
        factorization
    }

    /// Peel rational roots off a primitive integer polynomial
    fn split_rational_roots(&self, mut ints: Vec<IBig>) -> Vec<Vec<IBig>> {
        let mut factors = Vec::new();

        // x^k first
        while ints.len() > 1 && ints[0].is_zero() {
            ints.remove(0);
            factors.push(vec![IBig::ZERO, IBig::ONE]);
        }

        while ints.len() > 2 {
            let Some((p, q)) = self.find_rational_root(&ints) else {
                break;
            };
            ints = Poly::div_linear(&ints, &p, &q);
            factors.push(vec![-p, q]);
        }

        if ints.len() > 1 {
            factors.push(ints);
        }
        factors
    }

    /// Some root `p/q` of the polynomial, with `q > 0` and `gcd(p, q) = 1`
    fn find_rational_root(&self, ints: &[IBig]) -> Option<(IBig, IBig)> {
        let a0 = ints.first()?;
        let an = ints.last()?;
        let ps = divisors(a0)?;
        let qs = divisors(an)?;
        if ps.len() * qs.len() * 2 > self.max_root_candidates {
            debug!(candidates = ps.len() * qs.len() * 2, "root search skipped");
            return None;
        }
        for q in &qs {
            for p in &ps {
                if gcd_u64(*p, *q) != 1 {
                    continue;
                }
                let q_big = IBig::from(*q);
                for p_big in [IBig::from(*p), -IBig::from(*p)] {
                    if Poly::eval_homogeneous(ints, &p_big, &q_big).is_zero() {
                        return Some((p_big, q_big));
                    }
                }
            }
        }
        None
    }
}

impl Factorizer for PolynomialFactorizer {
    fn factor(&self, expression: &str) -> Result<Factorization, AlgebraError> {
        let (poly, var) = self.expand(expression)?;
        let var = var.unwrap_or_else(|| "x".to_string());
        let factorization = self.factor_poly(&poly, &var);
        debug!(expression, factors = factorization.factors.len(), "factored");
        Ok(factorization)
    }
}

/// Yun's square-free decomposition: `(part, multiplicity)` pairs whose
/// product (with multiplicities) equals `poly` up to a constant.
fn square_free_parts(poly: &Poly) -> Vec<(Poly, u32)> {
    let mut parts = Vec::new();
    let derivative = poly.derivative();
    let a = poly.gcd(&derivative);
    let mut b = poly.exact_div(&a);
    let mut c = derivative.exact_div(&a);
    let mut d = c.sub(&b.derivative());
    let mut i = 1u32;

    while !b.is_constant() {
        let a = b.gcd(&d);
        b = b.exact_div(&a);
        c = d.exact_div(&a);
        d = c.sub(&b.derivative());
        if !a.is_constant() {
            parts.push((a, i));
        }
        i += 1;
    }
    parts
}

/// Positive divisors of |n|; `None` when |n| is zero or too large to scan
fn divisors(n: &IBig) -> Option<Vec<u64>> {
    let magnitude: UBig = n.unsigned_abs();
    let n = u64::try_from(&magnitude).ok()?;
    if n == 0 || n > MAX_DIVISOR_SEARCH {
        return None;
    }
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut i = 1u64;
    while i * i <= n {
        if n % i == 0 {
            small.push(i);
            if i != n / i {
                large.push(n / i);
            }
        }
        i += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
