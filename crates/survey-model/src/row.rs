#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use crate::Value;

/// Ordered column names of a dataset, as read from the first line.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Copy of this header with `name` appended, unless it is already present.
    #[must_use]
    pub fn with_column(&self, name: &str) -> Self {
        let mut columns = self.columns.clone();
        if !self.contains(name) {
            columns.push(name.to_string());
        }
        Self { columns }
    }
}

/// One record keyed by column name.
///
/// Stages only rewrite values or append a column; keys are never removed.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    pub cells: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip header names with positional values. Short records are padded with
    /// `Missing`; surplus values are ignored.
    pub fn from_values<I>(header: &Header, values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut values = values.into_iter();
        let cells = header
            .iter()
            .map(|name| (name.to_string(), values.next().unwrap_or(Value::Missing)))
            .collect();
        Self { cells }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    pub fn set(&mut self, column: &str, value: Value) {
        self.cells.insert(column.to_string(), value);
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Numeric view of a column; absent, text and missing cells yield `None`.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_f64)
    }

    /// Values in header order, rendered as strings (missing as empty).
    pub fn rendered(&self, header: &Header) -> Vec<String> {
        header
            .iter()
            .map(|name| self.get(name).map(ToString::to_string).unwrap_or_default())
            .collect()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (name, value)) in self.cells.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value:?}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Header {
        Header::new(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    }

    #[test]
    fn from_values_pads_short_records() {
        let row = Row::from_values(&header(), vec![Value::Text("1".to_string())]);
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("B"), Some(&Value::Missing));
        assert_eq!(row.get("C"), Some(&Value::Missing));
    }

    #[test]
    fn from_values_drops_surplus_values() {
        let values = ["1", "2", "3", "4"].map(Value::from_raw);
        let row = Row::from_values(&header(), values);
        assert_eq!(row.len(), 3);
        assert!(!row.contains("D"));
    }

    #[test]
    fn with_column_appends_once() {
        let extended = header().with_column("Remarks");
        assert_eq!(extended.columns().last().map(String::as_str), Some("Remarks"));
        assert_eq!(extended.with_column("Remarks").len(), 4);
    }

    #[test]
    fn rendered_follows_header_order() {
        let mut row = Row::new();
        row.set("C", Value::Float(2.0));
        row.set("A", Value::Integer(7));
        assert_eq!(row.rendered(&header()), vec!["7", "", "2.0"]);
    }
}
