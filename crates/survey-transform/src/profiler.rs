//! Schema profiler.
//!
//! One full pass over the dataset decides, per column, whether it is numeric
//! (integer or float) or text and computes the mean of present numeric values.
//! The result is the read-only `DatasetProfile` every row stage shares.

use std::collections::BTreeMap;

use tracing::{debug, info};

use survey_model::{
    ColumnProfile, DatasetProfile, Header, NumericType, ProfileError, Row, Value, round2,
};

#[derive(Debug, Default, Clone, Copy)]
struct ColumnStats {
    present: usize,
    missing: usize,
    integers: usize,
    floats: usize,
    non_numeric: usize,
    sum: f64,
}

impl ColumnStats {
    fn observe(&mut self, value: Option<&Value>) {
        let Some(value) = value.filter(|value| !value.is_blank()) else {
            self.missing += 1;
            return;
        };
        self.present += 1;
        match value {
            Value::Integer(v) => {
                self.integers += 1;
                self.sum += *v as f64;
            }
            Value::Float(v) if v.is_finite() => {
                self.floats += 1;
                self.sum += *v;
            }
            Value::Text(text) => match classify(text) {
                Numeric::Integer(v) => {
                    self.integers += 1;
                    self.sum += v as f64;
                }
                Numeric::Float(v) => {
                    self.floats += 1;
                    self.sum += v;
                }
                Numeric::NotNumeric => self.non_numeric += 1,
            },
            Value::Float(_) | Value::Missing => self.non_numeric += 1,
        }
    }

    fn finish(self) -> ColumnProfile {
        if self.present == 0 || self.non_numeric > 0 {
            return ColumnProfile::text(self.present, self.missing);
        }
        // A single missing cell promotes an integer column to float.
        let numeric_type = if self.floats == 0 && self.missing == 0 {
            NumericType::Integer
        } else {
            NumericType::Float
        };
        let mean = round2(self.sum / self.present as f64);
        ColumnProfile::numeric(numeric_type, mean, self.present, self.missing)
    }
}

enum Numeric {
    Integer(i64),
    Float(f64),
    NotNumeric,
}

fn classify(text: &str) -> Numeric {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Numeric::Integer(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Numeric::Float(v),
        _ => Numeric::NotNumeric,
    }
}

/// Profile every column of `header` over all `rows`.
///
/// # Errors
///
/// Returns `ProfileError::NoColumns` for an empty header and
/// `ProfileError::Empty` when there are no records.
pub fn profile_rows(header: &Header, rows: &[Row]) -> Result<DatasetProfile, ProfileError> {
    if header.is_empty() {
        return Err(ProfileError::NoColumns);
    }
    if rows.is_empty() {
        return Err(ProfileError::Empty);
    }

    let mut stats: Vec<ColumnStats> = vec![ColumnStats::default(); header.len()];
    for row in rows {
        for (name, column) in header.iter().zip(stats.iter_mut()) {
            column.observe(row.get(name));
        }
    }

    let mut columns = BTreeMap::new();
    for (name, column) in header.iter().zip(stats) {
        let profile = column.finish();
        debug!(
            column = name,
            kind = profile.kind.label(),
            mean = ?profile.mean,
            present = profile.present,
            missing = profile.missing,
            "column profiled"
        );
        columns.insert(name.to_string(), profile);
    }

    let profile = DatasetProfile {
        header: header.clone(),
        row_count: rows.len(),
        columns,
    };
    info!(
        columns = header.len(),
        numeric_columns = profile.numeric_columns().count(),
        rows = rows.len(),
        "dataset profiled"
    );
    Ok(profile)
}
