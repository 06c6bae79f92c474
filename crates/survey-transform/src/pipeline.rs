//! Fixed-order row pipeline.
//!
//! Imputation runs first because the date and remark stages read the cells it
//! fills and casts. The order is not configurable.

use std::sync::Arc;

use tracing::error;

use survey_model::{DatasetProfile, PipelineConfig, Row, RowProcessingError};

use crate::dates::DateNormalizer;
use crate::impute::ValueImputer;
use crate::redact::redact_row;
use crate::remarks::RemarkGenerator;
use crate::stage::{RowDiagnostics, RowStage};

/// A row after every stage ran, with the counters collected on the way.
#[derive(Debug, Clone)]
pub struct ProcessedRow {
    pub row: Row,
    pub diagnostics: RowDiagnostics,
}

pub struct RowPipeline {
    stages: [Box<dyn RowStage>; 3],
    remarks_column: String,
}

impl RowPipeline {
    pub fn new(
        imputer: ValueImputer,
        dates: DateNormalizer,
        remarks: RemarkGenerator,
    ) -> Self {
        let remarks_column = remarks.column().to_string();
        Self {
            stages: [Box::new(imputer), Box::new(dates), Box::new(remarks)],
            remarks_column,
        }
    }

    pub fn from_config(profile: Arc<DatasetProfile>, config: &PipelineConfig) -> Self {
        Self::new(
            ValueImputer::new(profile),
            DateNormalizer::new(config.date_column.clone(), config.date_patterns.clone()),
            RemarkGenerator::new(config.remarks.clone(), config.remarks_column.clone()),
        )
    }

    pub fn stage_names(&self) -> [&'static str; 3] {
        [
            self.stages[0].name(),
            self.stages[1].name(),
            self.stages[2].name(),
        ]
    }

    pub fn remarks_column(&self) -> &str {
        &self.remarks_column
    }

    /// Run all stages over one row.
    ///
    /// # Errors
    ///
    /// A stage fault is logged together with the row contents and returned
    /// unchanged; the caller decides whether to abort or skip.
    pub fn process(&self, mut row: Row) -> Result<ProcessedRow, RowProcessingError> {
        let mut diagnostics = RowDiagnostics::default();
        for stage in &self.stages {
            if let Err(err) = stage.apply(&mut row, &mut diagnostics) {
                error!(
                    stage = stage.name(),
                    error = %err,
                    row = %redact_row(&row),
                    "row processing failed"
                );
                return Err(err);
            }
        }
        Ok(ProcessedRow { row, diagnostics })
    }
}
