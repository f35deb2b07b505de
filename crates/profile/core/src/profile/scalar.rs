//! Scalar attribute values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single attribute value: the unit of data recorded in snapshots.
///
/// Fixed attribute values, discrete distribution outcomes and sampled numbers
/// are all represented as a `Scalar`. Serialized untagged so documents can
/// write `value: 3`, `value: "X"` or `value: true` directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Returns the numeric value, if this scalar is a number.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if this scalar is a number.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{}", value),
            Scalar::Number(value) => write!(f, "{}", value),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_plain_representation() {
        assert_eq!(Scalar::from(5.0).to_string(), "5");
        assert_eq!(Scalar::from(2.5).to_string(), "2.5");
        assert_eq!(Scalar::from("high").to_string(), "high");
        assert_eq!(Scalar::from(true).to_string(), "true");
    }

    #[test]
    fn deserializes_untagged_values() {
        let values: Vec<Scalar> = serde_json::from_str(r#"[3, 1.5, "x", false]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Scalar::Number(3.0),
                Scalar::Number(1.5),
                Scalar::Text("x".into()),
                Scalar::Bool(false),
            ]
        );
    }

    #[test]
    fn only_numbers_are_numeric() {
        assert_eq!(Scalar::from(4.0).as_number(), Some(4.0));
        assert!(Scalar::from("4").as_number().is_none());
        assert!(!Scalar::from(true).is_numeric());
    }
}
