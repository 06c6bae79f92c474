//! Per-column type and mean profile consumed by the imputation stage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Header;

/// Storage type of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericType {
    Integer,
    Float,
}

/// Declared value type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric(NumericType),
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Numeric(_))
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnKind::Numeric(NumericType::Integer) => "integer",
            ColumnKind::Numeric(NumericType::Float) => "float",
            ColumnKind::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub kind: ColumnKind,
    /// Mean over present values, rounded to 2 decimals. `Some` iff numeric.
    pub mean: Option<f64>,
    pub present: usize,
    pub missing: usize,
}

impl ColumnProfile {
    pub fn text(present: usize, missing: usize) -> Self {
        Self {
            kind: ColumnKind::Text,
            mean: None,
            present,
            missing,
        }
    }

    pub fn numeric(numeric_type: NumericType, mean: f64, present: usize, missing: usize) -> Self {
        Self {
            kind: ColumnKind::Numeric(numeric_type),
            mean: Some(mean),
            present,
            missing,
        }
    }
}

/// Profile of every column in a dataset, computed once before any row is
/// processed and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub header: Header,
    pub row_count: usize,
    pub columns: BTreeMap<String, ColumnProfile>,
}

impl DatasetProfile {
    pub fn get(&self, column: &str) -> Option<&ColumnProfile> {
        self.columns.get(column)
    }

    /// Profiles in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnProfile)> {
        self.header
            .iter()
            .filter_map(|name| self.columns.get(name).map(|profile| (name, profile)))
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, profile)| profile.kind.is_numeric())
            .map(|(name, _)| name)
    }
}

/// Round to two decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
