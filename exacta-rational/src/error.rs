use exacta_core::{ExactError, NumberError};
use thiserror::Error;
use crate::AlgebraError;

/// Errors from fraction reconstruction and simplification
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FractionError {
    #[error("invalid fraction literal '{0}'")]
    Parse(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("input is {actual} characters long, limit is {limit}")]
    LimitExceeded { limit: usize, actual: usize },

    #[error(transparent)]
    Number(#[from] NumberError),

    #[error("algebra engine failed: {0}")]
    Algebra(#[from] AlgebraError),
}

impl From<FractionError> for ExactError {
    fn from(err: FractionError) -> Self {
        match err {
            FractionError::Parse(literal) => {
                ExactError::parse_error(format!("invalid fraction literal '{}'", literal))
                    .with_suggestion("Use a decimal (0.75), a ratio (6/8) or a polynomial ratio ((x^2-4)/(x-2))")
            }
            FractionError::DivisionByZero => ExactError::div_zero(),
            e @ FractionError::LimitExceeded { .. } => ExactError::parse_error(e.to_string()),
            FractionError::Number(e) => e.into(),
            FractionError::Algebra(e) => ExactError::external_engine(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exacta_core::ErrorKind;

    #[test]
    fn test_kinds() {
        let cases = [
            (FractionError::Parse("1..2".into()), ErrorKind::Parse),
            (FractionError::DivisionByZero, ErrorKind::DivisionByZero),
            (FractionError::LimitExceeded { limit: 10, actual: 11 }, ErrorKind::Parse),
            (FractionError::Number(NumberError::DivisionByZero), ErrorKind::DivisionByZero),
            (FractionError::Algebra(AlgebraError::Parse("x +".into())), ErrorKind::ExternalEngine),
        ];
        for (err, kind) in cases {
            let exact: ExactError = err.into();
            assert_eq!(exact.kind, kind);
        }
    }

    #[test]
    fn test_external_engine_carries_cause() {
        let exact: ExactError = FractionError::Algebra(AlgebraError::Unsupported("x*y".into())).into();
        assert_eq!(exact.message, "algebra engine failed: unsupported expression: x*y");
    }
}
