//! Multi-format date normalization.
//!
//! Candidate layouts are tried in a fixed order and the first one that yields
//! a valid calendar date wins. Ambiguous strings such as `01/05/2023` are
//! resolved by that order alone, never by locale.

use chrono::NaiveDate;
use tracing::{trace, warn};

use survey_model::{CANONICAL_DATE_FORMAT, DatePattern, Row, RowProcessingError, Value};

use crate::redact::redact_value;
use crate::stage::{RowDiagnostics, RowStage};

pub const STAGE_NAME: &str = "normalize_date";

/// Outcome of matching a raw string against the candidate layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMatch {
    Parsed { date: NaiveDate, pattern: DatePattern },
    NoMatch,
}

/// Try each pattern in order; chrono rejects impossible dates (month 13,
/// February 30) so an invalid date fails that pattern instead of rolling over.
pub fn match_date(raw: &str, patterns: &[DatePattern]) -> DateMatch {
    let trimmed = raw.trim();
    patterns
        .iter()
        .find_map(|&pattern| {
            NaiveDate::parse_from_str(trimmed, pattern.format())
                .ok()
                .map(|date| DateMatch::Parsed { date, pattern })
        })
        .unwrap_or(DateMatch::NoMatch)
}

pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

#[derive(Debug, Clone)]
pub struct DateNormalizer {
    column: String,
    patterns: Vec<DatePattern>,
}

impl DateNormalizer {
    pub fn new(column: impl Into<String>, patterns: Vec<DatePattern>) -> Self {
        Self {
            column: column.into(),
            patterns,
        }
    }

    fn rewrite(&self, row: &mut Row, diagnostics: &mut RowDiagnostics) {
        let raw = match row.get(&self.column) {
            None | Some(Value::Missing) => None,
            Some(value) if value.is_blank() => None,
            Some(value) => Some(value.to_string()),
        };
        let normalized = match raw {
            None => Value::Missing,
            Some(raw) => match match_date(&raw, &self.patterns) {
                DateMatch::Parsed { date, pattern } => {
                    trace!(column = %self.column, %pattern, "date parsed");
                    Value::Text(format_canonical(date))
                }
                DateMatch::NoMatch => {
                    diagnostics.unparseable_dates += 1;
                    warn!(
                        column = %self.column,
                        value = %redact_value(&raw),
                        "could not parse date"
                    );
                    Value::Missing
                }
            },
        };
        row.set(&self.column, normalized);
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new("Date", DatePattern::DEFAULT_ORDER.to_vec())
    }
}

impl RowStage for DateNormalizer {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn apply(
        &self,
        row: &mut Row,
        diagnostics: &mut RowDiagnostics,
    ) -> Result<(), RowProcessingError> {
        self.rewrite(row, diagnostics);
        Ok(())
    }
}

/// Normalize `column` of `row` with the default pattern priority.
///
/// The column is always present afterwards, holding either a `YYYY-MM-DD`
/// date or `Value::Missing`.
pub fn normalize_date(mut row: Row, column: &str) -> Row {
    let normalizer = DateNormalizer::new(column, DatePattern::DEFAULT_ORDER.to_vec());
    normalizer.rewrite(&mut row, &mut RowDiagnostics::default());
    row
}
