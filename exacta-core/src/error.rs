//! Structured errors returned across the Exacta boundary
//!
//! Errors never crash the system. They are values carrying a machine
//! readable kind, a message that can be shown to an end user as-is, and
//! an optional hint on how to fix the input.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_CATEGORY: &str = "INCOMPATIBLE_CATEGORY";
    pub const NON_FINITE_INPUT: &str = "NON_FINITE_INPUT";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const EXTERNAL_ENGINE: &str = "EXTERNAL_ENGINE";
}

/// The closed error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A unit name does not resolve in the registry
    #[serde(rename = "UNKNOWN_UNIT")]
    UnknownUnit,
    /// Source and target units belong to different categories
    #[serde(rename = "INCOMPATIBLE_CATEGORY")]
    IncompatibleCategory,
    /// Input value is NaN or infinite
    #[serde(rename = "NON_FINITE_INPUT")]
    NonFiniteInput,
    /// A decimal, fraction or expression literal is malformed
    #[serde(rename = "PARSE_ERROR")]
    Parse,
    /// A fraction with a zero denominator
    #[serde(rename = "DIV_ZERO")]
    DivisionByZero,
    /// The algebra collaborator could not parse or factor its input
    #[serde(rename = "EXTERNAL_ENGINE")]
    ExternalEngine,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnknownUnit => codes::UNKNOWN_UNIT,
            ErrorKind::IncompatibleCategory => codes::INCOMPATIBLE_CATEGORY,
            ErrorKind::NonFiniteInput => codes::NON_FINITE_INPUT,
            ErrorKind::Parse => codes::PARSE_ERROR,
            ErrorKind::DivisionByZero => codes::DIV_ZERO,
            ErrorKind::ExternalEngine => codes::EXTERNAL_ENGINE,
        }
    }

    /// Long name, e.g. "UnknownUnitError"
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::UnknownUnit => "UnknownUnitError",
            ErrorKind::IncompatibleCategory => "IncompatibleCategoryError",
            ErrorKind::NonFiniteInput => "NonFiniteInputError",
            ErrorKind::Parse => "ParseError",
            ErrorKind::DivisionByZero => "DivisionByZeroError",
            ErrorKind::ExternalEngine => "ExternalEngineError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured error value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactError {
    /// Machine-readable kind
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ExactError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_unit(token: &str) -> Self {
        Self::new(ErrorKind::UnknownUnit, format!("unknown unit: {}", token))
    }

    pub fn incompatible_category(from: &str, from_category: &str, to: &str, to_category: &str) -> Self {
        Self::new(
            ErrorKind::IncompatibleCategory,
            format!("cannot convert {} ({}) to {} ({})", from, from_category, to, to_category),
        )
        .with_suggestion("Both units must measure the same kind of quantity")
    }

    pub fn non_finite(value: f64) -> Self {
        Self::new(ErrorKind::NonFiniteInput, format!("value must be finite, got {}", value))
    }

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, format!("parse error: {}", details.into()))
    }

    pub fn div_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero, "division by zero")
            .with_suggestion("Ensure the denominator is not zero")
    }

    pub fn external_engine(cause: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalEngine, format!("algebra engine failed: {}", cause.into()))
    }
}

impl std::fmt::Display for ExactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind.code(), self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExactError {}

impl From<NumberError> for ExactError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::parse_error(format!("invalid number '{}'", s))
                .with_suggestion("Use digits with at most one decimal point, e.g. 0.75 or 3/4"),
            NumberError::DivisionByZero => Self::div_zero(),
            NumberError::NonFinite(v) => Self::non_finite(v),
            e @ NumberError::ExponentOutOfRange(_) => Self::parse_error(e.to_string()),
        }
    }
}
