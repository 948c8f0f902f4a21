//! Canonical rendering of result values
//!
//! Downstream consumers compare these strings verbatim, so every value
//! has exactly one rendering per format.

use crate::{ExactError, Value};

/// Display format for numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Shortest decimal that round-trips to the same f64 (default)
    #[default]
    Shortest,
    /// At most this many decimal places, trailing zeros trimmed
    Decimal(u32),
}

/// Value renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFormatter {
    number_format: NumberFormat,
}

impl ResultFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Render any value to its canonical text
    pub fn render(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => self.render_number(*n),
            Value::Fraction(f) => f.to_string(),
            Value::Expression(s) => s.clone(),
            Value::Error(e) => self.render_error(e),
        }
    }

    /// Integral values print without a fractional part; `-0` prints as `0`.
    pub fn render_number(&self, n: f64) -> String {
        if n == 0.0 {
            return "0".to_string();
        }
        match self.number_format {
            NumberFormat::Shortest => format!("{}", n),
            NumberFormat::Decimal(places) => {
                let fixed = format!("{:.prec$}", n, prec = places as usize);
                let trimmed = if fixed.contains('.') {
                    fixed.trim_end_matches('0').trim_end_matches('.')
                } else {
                    fixed.as_str()
                };
                if trimmed == "-0" {
                    "0".to_string()
                } else {
                    trimmed.to_string()
                }
            }
        }
    }

    pub fn render_error(&self, e: &ExactError) -> String {
        let mut out = format!("Error [{}]: {}", e.code(), e.message);
        if let Some(ref suggestion) = e.suggestion {
            out.push_str(&format!(" (suggestion: {})", suggestion));
        }
        out
    }

    /// Structured rendering for callers that want JSON
    pub fn render_json(&self, value: &Value) -> serde_json::Value {
        match value {
            Value::Number(n) => serde_json::json!({
                "type": "number",
                "value": n,
                "text": self.render_number(*n),
            }),
            Value::Fraction(f) => serde_json::json!({
                "type": "fraction",
                "value": f.to_string(),
                "numerator": f.numerator().to_string(),
                "denominator": f.denominator().to_string(),
            }),
            Value::Expression(s) => serde_json::json!({
                "type": "expression",
                "value": s,
            }),
            Value::Error(e) => serde_json::json!({
                "type": "error",
                "error": e,
            }),
        }
    }
}
