//! Dense univariate polynomials over the rationals
//!
//! Coefficients are stored low degree first, `[a0, a1, ..., an]`, with no
//! trailing zeros. The zero polynomial has no coefficients.

use dashu_base::{BitTest, Gcd, UnsignedAbs};
use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<RBig>,
}

impl Poly {
    pub fn zero() -> Self {
        Poly { coeffs: Vec::new() }
    }

    pub fn constant(c: RBig) -> Self {
        Poly::from_coeffs(vec![c])
    }

    /// The polynomial `x`
    pub fn x() -> Self {
        Poly::from_coeffs(vec![RBig::ZERO, RBig::ONE])
    }

    pub fn from_coeffs(mut coeffs: Vec<RBig>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Poly { coeffs }
    }

    pub fn from_integers(coeffs: &[IBig]) -> Self {
        Poly::from_coeffs(coeffs.iter().cloned().map(RBig::from).collect())
    }

    pub fn coeffs(&self) -> &[RBig] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree; the zero polynomial reports 0
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    pub fn leading(&self) -> RBig {
        self.coeffs.last().cloned().unwrap_or(RBig::ZERO)
    }

    /// Constant value, if the polynomial is constant
    pub fn as_constant(&self) -> Option<RBig> {
        match self.coeffs.len() {
            0 => Some(RBig::ZERO),
            1 => Some(self.coeffs[0].clone()),
            _ => None,
        }
    }

    /// Largest coefficient size, numerator plus denominator bits
    pub fn max_bits(&self) -> usize {
        self.coeffs
            .iter()
            .map(|c| c.numerator().unsigned_abs().bit_len() + c.denominator().bit_len())
            .max()
            .unwrap_or(0)
    }

    pub fn add(&self, other: &Poly) -> Poly {
        let n = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..n)
            .map(|i| {
                let a = self.coeffs.get(i).cloned().unwrap_or(RBig::ZERO);
                match other.coeffs.get(i) {
                    Some(b) => a + b,
                    None => a,
                }
            })
            .collect();
        Poly::from_coeffs(coeffs)
    }

    pub fn neg(&self) -> Poly {
        Poly { coeffs: self.coeffs.iter().map(|c| -c).collect() }
    }

    pub fn sub(&self, other: &Poly) -> Poly {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Poly) -> Poly {
        if self.is_zero() || other.is_zero() {
            return Poly::zero();
        }
        let mut coeffs = vec![RBig::ZERO; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = &coeffs[i + j] + a * b;
            }
        }
        Poly::from_coeffs(coeffs)
    }

    pub fn scale(&self, c: &RBig) -> Poly {
        Poly::from_coeffs(self.coeffs.iter().map(|a| a * c).collect())
    }

    pub fn derivative(&self) -> Poly {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * RBig::from(i as u64))
            .collect();
        Poly::from_coeffs(coeffs)
    }

    /// Euclidean division; `None` when dividing by zero
    pub fn div_rem(&self, divisor: &Poly) -> Option<(Poly, Poly)> {
        if divisor.is_zero() {
            return None;
        }
        let lead = divisor.leading();
        let mut rem = self.coeffs.clone();
        let dd = divisor.degree();
        if self.coeffs.len() < divisor.coeffs.len() {
            return Some((Poly::zero(), self.clone()));
        }
        let mut quot = vec![RBig::ZERO; self.coeffs.len() - dd];
        for k in (0..quot.len()).rev() {
            let q = &rem[k + dd] / &lead;
            if !q.is_zero() {
                for (j, d) in divisor.coeffs.iter().enumerate() {
                    rem[k + j] = &rem[k + j] - &q * d;
                }
            }
            quot[k] = q;
        }
        rem.truncate(dd);
        Some((Poly::from_coeffs(quot), Poly::from_coeffs(rem)))
    }

    /// Monic greatest common divisor (zero only when both are zero)
    pub fn gcd(&self, other: &Poly) -> Poly {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = match a.div_rem(&b) {
                Some((_, r)) => r,
                None => break,
            };
            a = b;
            b = r;
        }
        a.monic()
    }

    pub fn monic(&self) -> Poly {
        if self.is_zero() {
            return self.clone();
        }
        let inv = RBig::ONE / self.leading();
        self.scale(&inv)
    }

    /// Exact quotient, assuming `divisor` divides `self`
    pub fn exact_div(&self, divisor: &Poly) -> Poly {
        self.div_rem(divisor).map(|(q, _)| q).unwrap_or_else(Poly::zero)
    }

    /// Split into `content * primitive` where `primitive` has coprime
    /// integer coefficients and a positive leading coefficient.
    pub fn primitive_part(&self) -> (RBig, Vec<IBig>) {
        if self.is_zero() {
            return (RBig::ZERO, Vec::new());
        }
        let mut lcm = UBig::ONE;
        for c in &self.coeffs {
            let d = c.denominator();
            let g = (&lcm).gcd(d);
            lcm = &lcm / &g * d;
        }
        let scale = RBig::from(lcm.clone());
        let ints: Vec<IBig> = self
            .coeffs
            .iter()
            .map(|c| {
                let (n, d) = (c * &scale).into_parts();
                debug_assert!(d == UBig::ONE);
                n
            })
            .collect();

        let mut g = UBig::ZERO;
        for n in ints.iter().filter(|n| !n.is_zero()) {
            g = (&g).gcd(n);
        }
        let negative = ints.last().is_some_and(|n| *n < IBig::ZERO);
        let divisor = if negative { -IBig::from(g.clone()) } else { IBig::from(g.clone()) };
        let primitive = ints.iter().map(|n| n / &divisor).collect();
        let content = RBig::from_parts(divisor, lcm);
        (content, primitive)
    }

    /// Evaluate at `p/q` scaled by `q^n`; zero exactly when `p/q` is a root
    pub fn eval_homogeneous(ints: &[IBig], p: &IBig, q: &IBig) -> IBig {
        let n = ints.len().saturating_sub(1);
        let mut total = IBig::ZERO;
        for (i, a) in ints.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            total += a * p.pow(i) * q.pow(n - i);
        }
        total
    }

    /// Divide integer coefficients by `(q*x - p)`, assuming `p/q` is a root
    pub fn div_linear(ints: &[IBig], p: &IBig, q: &IBig) -> Vec<IBig> {
        let n = ints.len().saturating_sub(1);
        if n == 0 {
            return Vec::new();
        }
        // q*b[i-1] - p*b[i] = a[i], walking down from b[n] = 0
        let mut b = vec![IBig::ZERO; n + 1];
        for i in (1..=n).rev() {
            b[i - 1] = (&ints[i] + p * &b[i]) / q;
        }
        b.truncate(n);
        b
    }

    /// Render integer coefficients in descending order: `x^2 + 2*x + 1`
    pub fn render_integers(ints: &[IBig], var: &str) -> String {
        let mut out = String::new();
        for (i, c) in ints.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let negative = *c < IBig::ZERO;
            let magnitude = if negative { -c } else { c.clone() };
            if out.is_empty() {
                if negative {
                    out.push('-');
                }
            } else {
                out.push_str(if negative { " - " } else { " + " });
            }
            let mono = match i {
                0 => String::new(),
                1 => var.to_string(),
                _ => format!("{}^{}", var, i),
            };
            if mono.is_empty() {
                out.push_str(&magnitude.to_string());
            } else if magnitude == IBig::ONE {
                out.push_str(&mono);
            } else {
                out.push_str(&format!("{}*{}", magnitude, mono));
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> Poly {
        Poly::from_coeffs(coeffs.iter().map(|&c| RBig::from(c)).collect())
    }

    fn ints(coeffs: &[i64]) -> Vec<IBig> {
        coeffs.iter().map(|&c| IBig::from(c)).collect()
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        assert_eq!(poly(&[1, 2, 0, 0]).degree(), 1);
        assert!(poly(&[0, 0]).is_zero());
    }

    #[test]
    fn test_mul() {
        // (x - 2)(x + 2) = x^2 - 4
        assert_eq!(poly(&[-2, 1]).mul(&poly(&[2, 1])), poly(&[-4, 0, 1]));
    }

    #[test]
    fn test_div_rem() {
        let (q, r) = poly(&[-4, 0, 1]).div_rem(&poly(&[-2, 1])).unwrap();
        assert_eq!(q, poly(&[2, 1]));
        assert!(r.is_zero());
        assert!(poly(&[1]).div_rem(&Poly::zero()).is_none());
    }

    #[test]
    fn test_gcd_is_monic() {
        // gcd(2x^2 - 2, 4x - 4) = x - 1
        let g = poly(&[-2, 0, 2]).gcd(&poly(&[-4, 4]));
        assert_eq!(g, poly(&[-1, 1]));
    }

    #[test]
    fn test_max_bits() {
        assert_eq!(Poly::zero().max_bits(), 0);
        // 255 needs 8 bits, the denominator 1 needs one more
        assert_eq!(poly(&[1, -255]).max_bits(), 9);
    }

    #[test]
    fn test_derivative() {
        assert_eq!(poly(&[1, 2, 3]).derivative(), poly(&[2, 6]));
        assert!(poly(&[5]).derivative().is_zero());
    }

    #[test]
    fn test_primitive_part() {
        // -x/2 - 1 = (-1/2) * (x + 2)
        let p = Poly::from_coeffs(vec![RBig::from(-1), RBig::from_parts(IBig::from(-1), UBig::from(2u8))]);
        let (content, prim) = p.primitive_part();
        assert_eq!(content, RBig::from_parts(IBig::from(-1), UBig::from(2u8)));
        assert_eq!(prim, ints(&[2, 1]));
    }

    #[test]
    fn test_linear_division() {
        // 2x^2 - x - 1 = (2x + 1)(x - 1); divide by (x - 1)
        let q = Poly::div_linear(&ints(&[-1, -1, 2]), &IBig::from(1), &IBig::from(1));
        assert_eq!(q, ints(&[1, 2]));
        assert!(Poly::eval_homogeneous(&ints(&[-1, -1, 2]), &IBig::from(-1), &IBig::from(2)).is_zero());
    }

    #[test]
    fn test_render() {
        assert_eq!(Poly::render_integers(&ints(&[1, 2, 1]), "x"), "x^2 + 2*x + 1");
        assert_eq!(Poly::render_integers(&ints(&[-2, 1]), "x"), "x - 2");
        assert_eq!(Poly::render_integers(&ints(&[1, 0, -3]), "t"), "-3*t^2 + 1");
        assert_eq!(Poly::render_integers(&ints(&[0]), "x"), "0");
    }
}
