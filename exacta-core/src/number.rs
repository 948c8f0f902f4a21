//! Exact rational numbers using dashu
//!
//! Literals are read through their decimal digit structure (sign, integer
//! digits, fractional digits, exponent) straight into an integer ratio.
//! Nothing passes through binary floating point unless the caller hands
//! us an `f64` in the first place, and even then we go through the
//! shortest decimal that round-trips to that `f64`.

use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::Fraction;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("invalid number format: '{0}'")]
    ParseError(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("value is not finite: {0}")]
    NonFinite(f64),

    #[error("exponent {0} is outside the supported range of ±{max}", max = MAX_DECIMAL_EXPONENT)]
    ExponentOutOfRange(i64),
}

/// Largest decimal exponent accepted in scientific notation.
pub const MAX_DECIMAL_EXPONENT: i64 = 4096;

/// Arbitrary precision exact rational number
///
/// Built on dashu-ratio's RBig, which keeps every value reduced with a
/// positive denominator. All operations return Results or new Numbers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Number {
    inner: RBig,
}

impl Number {
    // ========== Construction ==========

    /// Create from string representation
    /// Supports: "123", "-0.75", ".5", "1.5e10", "3/4", "0.5/0.25"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        if let Some((num_str, den_str)) = s.split_once('/') {
            let num = parse_decimal(num_str)?;
            let den = parse_decimal(den_str)?;
            if den == RBig::ZERO {
                return Err(NumberError::DivisionByZero);
            }
            return Ok(Self { inner: num / den });
        }

        Ok(Self { inner: parse_decimal(s)? })
    }

    /// Create from i64
    pub fn from_i64(n: i64) -> Self {
        Self { inner: RBig::from(n) }
    }

    /// Create from ratio of two integers
    pub fn from_ratio(num: i64, den: i64) -> Result<Self, NumberError> {
        if den == 0 {
            return Err(NumberError::DivisionByZero);
        }
        Ok(Self { inner: RBig::from_parts_signed(IBig::from(num), IBig::from(den)) })
    }

    /// Create from f64 through its shortest round-trip decimal.
    ///
    /// `0.1_f64` becomes exactly 1/10, not the binary value nearest to it.
    pub fn from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::NonFinite(f));
        }
        // Display for f64 never uses exponent notation
        let s = format!("{}", f);
        Ok(Self { inner: parse_decimal(&s)? })
    }

    pub fn from_rbig(inner: RBig) -> Self {
        Self { inner }
    }

    pub fn as_rbig(&self) -> &RBig {
        &self.inner
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.inner == RBig::ZERO
    }

    pub fn is_one(&self) -> bool {
        self.inner == RBig::ONE
    }

    pub fn is_negative(&self) -> bool {
        self.inner < RBig::ZERO
    }

    pub fn is_integer(&self) -> bool {
        self.inner.is_int()
    }

    // ========== Basic Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    pub fn neg(&self) -> Self {
        Self { inner: -&self.inner }
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() { self.neg() } else { self.clone() }
    }

    // ========== Conversion ==========

    /// Nearest f64 (correctly rounded, one rounding step only)
    pub fn to_f64(&self) -> f64 {
        self.inner.to_f64().value()
    }

    /// Numerator and denominator of the reduced ratio
    pub fn to_fraction(&self) -> Fraction {
        let (numerator, denominator) = self.inner.clone().into_parts();
        Fraction::from_reduced(numerator, denominator)
    }

    pub fn numerator(&self) -> &IBig {
        self.inner.numerator()
    }

    pub fn denominator(&self) -> &UBig {
        self.inner.denominator()
    }
}

/// Parse a decimal literal into its exact value.
///
/// Grammar: `[+-] digits [. digits] [(e|E) [+-] digits]` where either the
/// integer or the fractional digit run may be empty, but not both.
/// The value is `digits * 10^(exponent - fractional_digit_count)`.
pub fn parse_decimal(s: &str) -> Result<RBig, NumberError> {
    let text = s.trim();
    let invalid = || NumberError::ParseError(s.to_string());

    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => {
            let exp_str = &body[pos + 1..];
            let digits = exp_str.strip_prefix(['+', '-']).unwrap_or(exp_str);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let exponent: i64 = exp_str.parse().map_err(|_| invalid())?;
            if exponent.abs() > MAX_DECIMAL_EXPONENT {
                return Err(NumberError::ExponentOutOfRange(exponent));
            }
            (&body[..pos], exponent)
        }
        None => (body, 0),
    };

    let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(invalid());
    }
    let all_digits = |d: &str| d.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_digits) || !all_digits(frac_digits) {
        return Err(invalid());
    }

    let digits = format!("{}{}", int_digits, frac_digits);
    let magnitude: UBig = digits.parse().map_err(|_| invalid())?;
    let mut numerator = IBig::from(magnitude);
    if negative {
        numerator = -numerator;
    }

    // Net power of ten to divide by
    let shift = frac_digits.len() as i64 - exponent;
    let ten = UBig::from(10u8);
    if shift >= 0 {
        Ok(RBig::from_parts(numerator, ten.pow(shift as usize)))
    } else {
        let factor = IBig::from(ten.pow((-shift) as usize));
        Ok(RBig::from(numerator * factor))
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::str::FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_str(s)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}
