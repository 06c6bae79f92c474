//! Shared contract of the row-rewriting stages.

use survey_model::{Row, RowProcessingError};

/// Per-row counters collected while the stages run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowDiagnostics {
    /// Missing cells that received a substitute value.
    pub imputed: usize,
    /// Present cells kept raw because they did not fit the column type.
    pub cast_failures: usize,
    /// Date cells that matched no candidate pattern.
    pub unparseable_dates: usize,
    /// Remark labels emitted, in rule order.
    pub labels: Vec<&'static str>,
}

/// A record-rewriting stage.
///
/// Stages hold no per-row state and may be shared across worker threads. Each
/// stage rewrites or appends fields of the row it is given; keys are never
/// removed.
pub trait RowStage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Rewrite `row` in place.
    ///
    /// # Errors
    ///
    /// Only for unexpected faults. Anticipated data-quality problems are
    /// recovered locally and counted in `diagnostics`.
    fn apply(
        &self,
        row: &mut Row,
        diagnostics: &mut RowDiagnostics,
    ) -> Result<(), RowProcessingError>;
}
