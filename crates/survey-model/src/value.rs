#![deny(unsafe_code)]

use std::fmt;

/// A single cell of a survey row.
///
/// Rows arrive from the codec holding only `Text` and `Missing`; the imputer
/// casts numeric columns to `Integer` or `Float`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Build a cell from raw text, mapping blank strings to `Missing`.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Value::Missing
        } else {
            Value::Text(raw.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Missing, or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Text(text) => text.trim().is_empty(),
            Value::Integer(_) | Value::Float(_) => false,
        }
    }

    /// Numeric view of the cell. Text is never coerced here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) | Value::Missing => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::Text(text) => f.write_str(text),
            Value::Missing => Ok(()),
        }
    }
}

/// Shortest round-trip form, keeping one decimal for integral values (`35.0`).
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}
