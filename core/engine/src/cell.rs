//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the value that a pivot cell carries.
//! CONTEXT: Pivot crates treat values as opaque; `CellValue` is the default
//! concrete value type they are instantiated with. Callers pre-compute values,
//! nothing here aggregates or validates them.

use serde::{Deserialize, Serialize};

/// The kind of a `CellValue`, used where callers ask for a column's "class".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Empty,
    Number,
    Text,
    Boolean,
}

/// Represents the raw data stored in a pivot cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// The value backfilled into cells that never received an explicit write.
    /// This is an empty text value, not `CellValue::Empty`.
    pub fn placeholder() -> Self {
        CellValue::Text(String::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            CellValue::Empty => ValueKind::Empty,
            CellValue::Number(_) => ValueKind::Number,
            CellValue::Text(_) => ValueKind::Text,
            CellValue::Boolean(_) => ValueKind::Boolean,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the display value of the cell as a String.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl PartialEq<&str> for CellValue {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, CellValue::Text(s) if s == other)
    }
}

impl PartialEq<f64> for CellValue {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, CellValue::Number(n) if n == other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert_eq!(CellValue::default(), CellValue::Empty);
        assert_eq!(CellValue::default().kind(), ValueKind::Empty);
    }

    #[test]
    fn placeholder_is_empty_text() {
        let value = CellValue::placeholder();
        assert_eq!(value, "");
        assert_eq!(value.kind(), ValueKind::Text);
        assert_ne!(value, CellValue::Empty);
    }

    #[test]
    fn display_value_trims_integral_numbers() {
        assert_eq!(CellValue::from(100).display_value(), "100");
        assert_eq!(CellValue::from(2.5).display_value(), "2.5");
        assert_eq!(CellValue::from(true).display_value(), "TRUE");
        assert_eq!(CellValue::Empty.display_value(), "");
    }

    #[test]
    fn compares_against_literals() {
        assert_eq!(CellValue::from(50), 50.0);
        assert_eq!(CellValue::from("Jan"), "Jan");
        assert_ne!(CellValue::from(50), "50");
    }

    #[test]
    fn serializes_as_tagged_enum() {
        let json = serde_json::to_string(&CellValue::from(1.5)).unwrap();
        assert_eq!(json, r#"{"Number":1.5}"#);
        let back: CellValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, 1.5);
    }
}
