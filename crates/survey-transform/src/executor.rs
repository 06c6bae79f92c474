//! Parallel row executor.
//!
//! Rows share nothing but the read-only profile held by the pipeline, so they
//! are processed on a rayon pool without locking. Results are collected back
//! in input order.

use std::collections::BTreeMap;

use rayon::prelude::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use survey_model::{Row, RowErrorPolicy, RowProcessingError};

use crate::pipeline::{ProcessedRow, RowPipeline};

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("row {index} failed: {source}")]
    Row {
        index: usize,
        #[source]
        source: RowProcessingError,
    },

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteOptions {
    /// Worker threads; 0 lets rayon pick one per CPU.
    pub jobs: usize,
    pub on_error: RowErrorPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
    pub imputed_values: usize,
    pub cast_failures: usize,
    pub unparseable_dates: usize,
    /// How many rows carry each remark label.
    pub labels: BTreeMap<String, usize>,
}

impl RunSummary {
    fn record(&mut self, processed: &ProcessedRow) {
        let diagnostics = &processed.diagnostics;
        self.rows_written += 1;
        self.imputed_values += diagnostics.imputed;
        self.cast_failures += diagnostics.cast_failures;
        self.unparseable_dates += diagnostics.unparseable_dates;
        for label in &diagnostics.labels {
            *self.labels.entry((*label).to_string()).or_insert(0) += 1;
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rows: Vec<Row>,
    pub summary: RunSummary,
}

/// Process every row through `pipeline`.
///
/// # Errors
///
/// With `RowErrorPolicy::Fail`, the first failing row (by input position)
/// aborts the run and no rows are returned.
pub fn execute(
    pipeline: &RowPipeline,
    rows: Vec<Row>,
    options: ExecuteOptions,
) -> Result<RunOutput, ExecuteError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()?;
    let rows_read = rows.len();
    let results: Vec<Result<ProcessedRow, RowProcessingError>> = pool.install(|| {
        rows.into_par_iter()
            .map(|row| pipeline.process(row))
            .collect()
    });

    let mut summary = RunSummary {
        rows_read,
        ..RunSummary::default()
    };
    let mut output = Vec::with_capacity(rows_read);
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(processed) => {
                summary.record(&processed);
                output.push(processed.row);
            }
            Err(source) => match options.on_error {
                RowErrorPolicy::Fail => return Err(ExecuteError::Row { index, source }),
                RowErrorPolicy::Skip => {
                    warn!(index, error = %source, "skipping failed row");
                    summary.rows_skipped += 1;
                }
            },
        }
    }
    info!(
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        rows_skipped = summary.rows_skipped,
        workers = pool.current_num_threads(),
        "rows processed"
    );
    Ok(RunOutput {
        rows: output,
        summary,
    })
}
