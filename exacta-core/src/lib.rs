//! Exacta Core - Fundamental types
//!
//! This crate provides the core types used throughout Exacta:
//! - `Number`: Exact arbitrary precision rational numbers
//! - `Fraction`: Reduced integer fractions
//! - `Value`: Boundary results (number, fraction, expression, error)
//! - `ExactError`: Structured errors with a closed set of kinds
//! - `ResultFormatter`: Canonical rendering of values

mod number;
mod fraction;
mod value;
mod error;
mod format;

pub use number::{Number, NumberError, parse_decimal, MAX_DECIMAL_EXPONENT};
pub use fraction::Fraction;
pub use value::Value;
pub use error::{ExactError, ErrorKind, codes};
pub use format::{ResultFormatter, NumberFormat};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, Fraction, Value, ExactError, ErrorKind};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert!(n.is_integer());
            assert_eq!(n.to_string(), "42");
        }

        #[test]
        fn test_from_str_decimal_is_exact() {
            let n = Number::from_str("0.1").unwrap();
            assert_eq!(n, Number::from_ratio(1, 10).unwrap());
        }

        #[test]
        fn test_from_str_reduces() {
            assert_eq!(Number::from_str("0.75").unwrap().to_string(), "3/4");
            assert_eq!(Number::from_str("1.25").unwrap().to_string(), "5/4");
            assert_eq!(Number::from_str("-2.50").unwrap().to_string(), "-5/2");
        }

        #[test]
        fn test_from_str_leading_and_trailing_point() {
            assert_eq!(Number::from_str(".5").unwrap().to_string(), "1/2");
            assert_eq!(Number::from_str("5.").unwrap().to_string(), "5");
            assert_eq!(Number::from_str("+7").unwrap().to_string(), "7");
        }

        #[test]
        fn test_from_str_scientific() {
            assert_eq!(Number::from_str("1.5e2").unwrap().to_string(), "150");
            assert_eq!(Number::from_str("25E-3").unwrap().to_string(), "1/40");
            // Integer mantissa keeps every digit
            let avogadro = Number::from_str("602214076e15").unwrap();
            assert_eq!(avogadro.to_string(), "602214076000000000000000");
        }

        #[test]
        fn test_from_str_fraction() {
            assert_eq!(Number::from_str("6/8").unwrap().to_string(), "3/4");
            assert_eq!(Number::from_str("0.5/0.25").unwrap().to_string(), "2");
            assert_eq!(Number::from_str("3/-4").unwrap().to_string(), "-3/4");
        }

        #[test]
        fn test_from_str_fraction_zero_denominator() {
            assert_eq!(Number::from_str("1/0"), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_from_str_malformed() {
            for bad in ["", "abc", "1.2.3", "-", "+", ".", "e5", "1e", "1e+", "1,5", "0x10", "1/2/3", "--1"] {
                assert!(
                    matches!(Number::from_str(bad), Err(NumberError::ParseError(_))),
                    "expected parse error for {:?}",
                    bad
                );
            }
        }

        #[test]
        fn test_exponent_guard() {
            assert!(matches!(
                Number::from_str("1e999999"),
                Err(NumberError::ExponentOutOfRange(999999))
            ));
        }

        #[test]
        fn test_very_long_decimal_stays_exact() {
            let digits = "1".repeat(200);
            let literal = format!("0.{}", digits);
            let n = Number::from_str(&literal).unwrap();
            let frac = n.to_fraction();
            // Repunits are coprime to 10, so nothing reduces
            assert_eq!(frac.numerator().to_string(), "1".repeat(200));
            assert_eq!(frac.denominator().to_string().len(), 201);
        }

        #[test]
        fn test_from_f64_uses_shortest_decimal() {
            let n = Number::from_f64(0.1).unwrap();
            assert_eq!(n.to_string(), "1/10");
            let n = Number::from_f64(-2.5).unwrap();
            assert_eq!(n.to_string(), "-5/2");
            let n = Number::from_f64(1e21).unwrap();
            assert!(n.is_integer());
        }

        #[test]
        fn test_from_f64_non_finite() {
            assert!(matches!(Number::from_f64(f64::NAN), Err(NumberError::NonFinite(_))));
            assert!(matches!(Number::from_f64(f64::INFINITY), Err(NumberError::NonFinite(_))));
        }

        #[test]
        fn test_to_f64_single_rounding() {
            let tenth = Number::from_i64(100).checked_div(&Number::from_i64(1000)).unwrap();
            assert_eq!(tenth.to_f64(), 0.1);
        }

        #[test]
        fn test_arithmetic() {
            let a = Number::from_str("0.1").unwrap();
            let b = Number::from_str("0.2").unwrap();
            assert_eq!(a.add(&b), Number::from_str("0.3").unwrap());
            assert_eq!(a.sub(&b), Number::from_str("-0.1").unwrap());
            assert_eq!(a.mul(&b), Number::from_str("0.02").unwrap());
            assert_eq!(b.checked_div(&a).unwrap(), Number::from_i64(2));
            assert_eq!(a.checked_div(&Number::from_i64(0)), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_serde_string() {
            let n = Number::from_str("0.75").unwrap();
            let json = serde_json::to_string(&n).unwrap();
            assert_eq!(json, "\"3/4\"");
            let back: Number = serde_json::from_str(&json).unwrap();
            assert_eq!(back, n);
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_display() {
            let e = ExactError::div_zero();
            assert_eq!(e.to_string(), "[DIV_ZERO] division by zero (suggestion: Ensure the denominator is not zero)");
        }

        #[test]
        fn test_from_number_error() {
            let e: ExactError = NumberError::ParseError("1.2.3".into()).into();
            assert_eq!(e.kind, ErrorKind::Parse);
            assert!(e.message.contains("1.2.3"));

            let e: ExactError = NumberError::NonFinite(f64::NAN).into();
            assert_eq!(e.kind, ErrorKind::NonFiniteInput);
        }

        #[test]
        fn test_kind_serializes_as_code() {
            let e = ExactError::unknown_unit("parsec");
            let json = serde_json::to_value(&e).unwrap();
            assert_eq!(json["kind"], "UNKNOWN_UNIT");
            assert_eq!(json["message"], "unknown unit: parsec");
            assert!(json.get("suggestion").is_none());
        }

        #[test]
        fn test_kind_names() {
            assert_eq!(ErrorKind::IncompatibleCategory.to_string(), "IncompatibleCategoryError");
            assert_eq!(ErrorKind::ExternalEngine.code(), codes::EXTERNAL_ENGINE);
        }
    }

    mod value_tests {
        use super::*;

        #[test]
        fn test_accessors() {
            let v = Value::Number(0.5);
            assert_eq!(v.as_number(), Some(0.5));
            assert!(v.as_fraction().is_none());
            assert!(!v.is_error());

            let v: Value = ExactError::div_zero().into();
            assert!(v.is_error());
            assert_eq!(v.type_name(), "Error");
        }

        #[test]
        fn test_value_serde_tagged() {
            let v = Value::Expression("x + 2".to_string());
            let json = serde_json::to_value(&v).unwrap();
            assert_eq!(json["type"], "expression");
            assert_eq!(json["value"], "x + 2");
        }
    }
}
