//! Rule-based clinical remarks.

use survey_model::remarks::{
    HIGH_BLOOD_PRESSURE, HIGH_GLUCOSE, LOW_GLUCOSE, NEGATIVE_TEST, OBESITY, POSITIVE_TEST,
};
use survey_model::{REMARK_SEPARATOR, RemarkRules, Row, RowProcessingError, Value};

use crate::stage::{RowDiagnostics, RowStage};

pub const STAGE_NAME: &str = "generate_remarks";

/// Evaluate every rule in order and collect the labels that fire.
///
/// Exactly one outcome label is always present. Cells that are absent, text,
/// or missing never satisfy a threshold.
pub fn derive_labels(row: &Row, rules: &RemarkRules) -> Vec<&'static str> {
    let mut labels = Vec::with_capacity(4);

    if row.number(&rules.outcome_column) == Some(rules.positive_outcome) {
        labels.push(POSITIVE_TEST);
    } else {
        labels.push(NEGATIVE_TEST);
    }

    match row.number(&rules.glucose_column) {
        Some(glucose) if glucose > rules.high_glucose => labels.push(HIGH_GLUCOSE),
        Some(glucose) if glucose < rules.low_glucose => labels.push(LOW_GLUCOSE),
        _ => {}
    }

    if row
        .number(&rules.bmi_column)
        .is_some_and(|bmi| bmi >= rules.obesity_bmi)
    {
        labels.push(OBESITY);
    }

    if row
        .number(&rules.blood_pressure_column)
        .is_some_and(|pressure| pressure > rules.high_blood_pressure)
    {
        labels.push(HIGH_BLOOD_PRESSURE);
    }

    labels
}

#[derive(Debug, Clone)]
pub struct RemarkGenerator {
    rules: RemarkRules,
    column: String,
}

impl RemarkGenerator {
    pub fn new(rules: RemarkRules, column: impl Into<String>) -> Self {
        Self {
            rules,
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl Default for RemarkGenerator {
    fn default() -> Self {
        Self::new(RemarkRules::default(), "Remarks")
    }
}

impl RowStage for RemarkGenerator {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn apply(
        &self,
        row: &mut Row,
        diagnostics: &mut RowDiagnostics,
    ) -> Result<(), RowProcessingError> {
        let labels = derive_labels(row, &self.rules);
        row.set(&self.column, Value::Text(labels.join(REMARK_SEPARATOR)));
        diagnostics.labels = labels;
        Ok(())
    }
}

/// Write the joined labels into a `Remarks` column.
pub fn generate_remarks(mut row: Row, rules: &RemarkRules) -> Row {
    let labels = derive_labels(&row, rules);
    row.set("Remarks", Value::Text(labels.join(REMARK_SEPARATOR)));
    row
}
