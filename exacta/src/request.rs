//! Request boundary
//!
//! One JSON object per call, tagged by `op`:
//!
//! ```json
//! {"op": "convert_unit", "value": 100, "from_unit": "meter", "to_unit": "kilometer"}
//! {"op": "to_fraction", "value": "0.75"}
//! {"op": "simplify_fraction", "fraction": "(x^2 - 4)/(x - 2)"}
//! {"op": "approximate_fraction", "value": "3.14159265", "max_denominator": 1000}
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    ConvertUnit {
        value: f64,
        from_unit: String,
        to_unit: String,
    },
    ToFraction {
        value: String,
    },
    SimplifyFraction {
        fraction: String,
    },
    ApproximateFraction {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_denominator: Option<u64>,
    },
}

impl Request {
    pub fn op(&self) -> &'static str {
        match self {
            Request::ConvertUnit { .. } => "convert_unit",
            Request::ToFraction { .. } => "to_fraction",
            Request::SimplifyFraction { .. } => "simplify_fraction",
            Request::ApproximateFraction { .. } => "approximate_fraction",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged() {
        let req: Request = serde_json::from_str(
            r#"{"op": "convert_unit", "value": 100, "from_unit": "meter", "to_unit": "kilometer"}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::ConvertUnit { value: 100.0, from_unit: "meter".into(), to_unit: "kilometer".into() }
        );
        assert_eq!(req.op(), "convert_unit");
    }

    #[test]
    fn test_optional_max_denominator() {
        let req: Request = serde_json::from_str(r#"{"op": "approximate_fraction", "value": "0.5"}"#).unwrap();
        assert_eq!(req, Request::ApproximateFraction { value: "0.5".into(), max_denominator: None });
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(serde_json::from_str::<Request>(r#"{"op": "integrate", "value": "x"}"#).is_err());
        assert!(serde_json::from_str::<Request>(r#"{"op": "to_fraction"}"#).is_err());
    }
}
