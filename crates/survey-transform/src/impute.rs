//! Value imputer.
//!
//! Missing cells of numeric columns receive the column mean cast to the
//! column's type; missing cells of text or unprofiled columns become empty
//! text. Present cells are cast to their declared type, and a cell that does
//! not fit keeps its raw value.

use std::sync::Arc;

use tracing::warn;

use survey_model::{
    ColumnKind, ColumnProfile, DatasetProfile, NumericType, Row, RowProcessingError, Value,
};

use crate::redact::redact_value;
use crate::stage::{RowDiagnostics, RowStage};

pub const STAGE_NAME: &str = "impute";

#[derive(Debug, Clone)]
pub struct ValueImputer {
    profile: Arc<DatasetProfile>,
}

impl ValueImputer {
    pub fn new(profile: Arc<DatasetProfile>) -> Self {
        Self { profile }
    }
}

impl RowStage for ValueImputer {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn apply(
        &self,
        row: &mut Row,
        diagnostics: &mut RowDiagnostics,
    ) -> Result<(), RowProcessingError> {
        impute_in_place(row, &self.profile, diagnostics)
    }
}

/// Impute and cast every header column of `row`.
///
/// # Errors
///
/// Fails only when a column mean cannot be represented in the column type.
pub fn impute(mut row: Row, profile: &DatasetProfile) -> Result<Row, RowProcessingError> {
    impute_in_place(&mut row, profile, &mut RowDiagnostics::default())?;
    Ok(row)
}

fn impute_in_place(
    row: &mut Row,
    profile: &DatasetProfile,
    diagnostics: &mut RowDiagnostics,
) -> Result<(), RowProcessingError> {
    for column in profile.header.iter() {
        let current = row.cells.remove(column).unwrap_or(Value::Missing);
        let column_profile = profile.get(column);
        let value = if current.is_blank() {
            diagnostics.imputed += 1;
            substitute(column, column_profile)?
        } else {
            match column_profile.map(|p| p.kind) {
                Some(ColumnKind::Numeric(numeric_type)) => {
                    cast_present(column, current, numeric_type, diagnostics)
                }
                Some(ColumnKind::Text) | None => Value::Text(current.to_string()),
            }
        };
        row.cells.insert(column.to_string(), value);
    }
    Ok(())
}

fn substitute(
    column: &str,
    column_profile: Option<&ColumnProfile>,
) -> Result<Value, RowProcessingError> {
    let Some(ColumnProfile {
        kind: ColumnKind::Numeric(numeric_type),
        mean: Some(mean),
        ..
    }) = column_profile
    else {
        return Ok(Value::Text(String::new()));
    };
    cast_mean(column, *mean, *numeric_type)
}

fn cast_mean(column: &str, mean: f64, numeric_type: NumericType) -> Result<Value, RowProcessingError> {
    let unrepresentable = |target| RowProcessingError::UnrepresentableMean {
        column: column.to_string(),
        mean,
        target,
    };
    if !mean.is_finite() {
        return Err(unrepresentable(numeric_type_label(numeric_type)));
    }
    match numeric_type {
        NumericType::Float => Ok(Value::Float(mean)),
        NumericType::Integer => {
            let truncated = mean.trunc();
            if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                return Err(unrepresentable("integer"));
            }
            Ok(Value::Integer(truncated as i64))
        }
    }
}

fn numeric_type_label(numeric_type: NumericType) -> &'static str {
    match numeric_type {
        NumericType::Integer => "integer",
        NumericType::Float => "float",
    }
}

fn cast_present(
    column: &str,
    value: Value,
    numeric_type: NumericType,
    diagnostics: &mut RowDiagnostics,
) -> Value {
    let cast = match (&value, numeric_type) {
        (Value::Integer(v), NumericType::Integer) => Some(Value::Integer(*v)),
        (Value::Integer(v), NumericType::Float) => Some(Value::Float(*v as f64)),
        (Value::Float(v), NumericType::Float) => Some(Value::Float(*v)),
        (Value::Float(v), NumericType::Integer) if v.is_finite() => {
            Some(Value::Integer(v.trunc() as i64))
        }
        (Value::Text(text), NumericType::Integer) => {
            text.trim().parse::<i64>().ok().map(Value::Integer)
        }
        (Value::Text(text), NumericType::Float) => {
            text.trim().parse::<f64>().ok().map(Value::Float)
        }
        _ => None,
    };
    cast.unwrap_or_else(|| {
        diagnostics.cast_failures += 1;
        let raw = value.to_string();
        warn!(
            column,
            value = %redact_value(&raw),
            expected = numeric_type_label(numeric_type),
            "could not cast value, keeping original"
        );
        value
    })
}
