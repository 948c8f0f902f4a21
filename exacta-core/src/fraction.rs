//! Reduced integer fractions
//!
//! A `Fraction` is always in lowest terms with the sign carried by the
//! numerator and a strictly positive denominator.

use dashu_base::UnsignedAbs;
use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Number, NumberError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: IBig,
    denominator: UBig,
}

impl Fraction {
    /// Build from signed parts, reducing by the GCD and moving the sign
    /// into the numerator.
    pub fn new(numerator: IBig, denominator: IBig) -> Result<Self, NumberError> {
        if denominator.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        let (numerator, denominator) = RBig::from_parts_signed(numerator, denominator).into_parts();
        Ok(Self { numerator, denominator })
    }

    pub fn from_integer(n: IBig) -> Self {
        Self { numerator: n, denominator: UBig::ONE }
    }

    /// Parts must already be reduced; only called with RBig output.
    pub(crate) fn from_reduced(numerator: IBig, denominator: UBig) -> Self {
        Self { numerator, denominator }
    }

    pub fn numerator(&self) -> &IBig {
        &self.numerator
    }

    pub fn denominator(&self) -> &UBig {
        &self.denominator
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn to_number(&self) -> Number {
        Number::from_rbig(RBig::from_parts(self.numerator.clone(), self.denominator.clone()))
    }

    /// `n` for integers, `n/d` otherwise
    pub fn to_reduced_string(&self) -> String {
        if self.is_integer() {
            self.numerator.to_string()
        } else {
            self.to_string()
        }
    }

    /// Closest fraction whose denominator does not exceed `max_denominator`.
    ///
    /// Walks the continued-fraction expansion of |self| and picks between the
    /// last convergent and the best semiconvergent. A `max_denominator` of 0
    /// is treated as 1.
    pub fn limit_denominator(&self, max_denominator: u64) -> Fraction {
        let max = IBig::from(max_denominator.max(1));
        let den = IBig::from(self.denominator.clone());
        if den <= max {
            return self.clone();
        }

        let negative = self.numerator < IBig::ZERO;
        let target = IBig::from((&self.numerator).unsigned_abs());

        let (mut p0, mut q0, mut p1, mut q1) = (IBig::ZERO, IBig::ONE, IBig::ONE, IBig::ZERO);
        let (mut n, mut d) = (target.clone(), den.clone());
        loop {
            let a = &n / &d;
            let q2 = &q0 + &a * &q1;
            if q2 > max {
                break;
            }
            let p2 = &p0 + &a * &p1;
            p0 = p1;
            q0 = q1;
            p1 = p2;
            q1 = q2;
            let r = &n - &a * &d;
            n = d;
            d = r;
            if d.is_zero() {
                break;
            }
        }

        let k = (&max - &q0) / &q1;
        let lower_num = &p0 + &k * &p1;
        let lower_den = &q0 + &k * &q1;

        let exact = RBig::from_parts(target, self.denominator.clone());
        let semi = RBig::from_parts_signed(lower_num, lower_den);
        let conv = RBig::from_parts_signed(p1, q1);

        let semi_err = abs_diff(&semi, &exact);
        let conv_err = abs_diff(&conv, &exact);
        let best = if conv_err <= semi_err { conv } else { semi };

        let best = if negative { -best } else { best };
        let (numerator, denominator) = best.into_parts();
        Fraction { numerator, denominator }
    }
}

fn abs_diff(a: &RBig, b: &RBig) -> RBig {
    let d = a - b;
    if d < RBig::ZERO { -d } else { d }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let number = Number::from_str(&s).map_err(serde::de::Error::custom)?;
        Ok(number.to_fraction())
    }
}
