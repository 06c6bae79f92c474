//! Per-record cleaning for health-survey datasets.
//!
//! - **profiler**: one pass over the dataset producing the shared `DatasetProfile`
//! - **impute**: mean/empty-string imputation and type casting
//! - **dates**: ordered multi-format date parsing to `YYYY-MM-DD`
//! - **remarks**: rule-based clinical remark labels
//! - **pipeline**: the fixed impute → dates → remarks order
//! - **executor**: parallel fan-out of rows with a skip/fail policy

pub mod dates;
pub mod executor;
pub mod impute;
pub mod pipeline;
pub mod profiler;
pub mod redact;
pub mod remarks;
pub mod stage;

pub use dates::{DateMatch, DateNormalizer, format_canonical, match_date, normalize_date};
pub use executor::{ExecuteError, ExecuteOptions, RunOutput, RunSummary, execute};
pub use impute::{ValueImputer, impute};
pub use pipeline::{ProcessedRow, RowPipeline};
pub use profiler::profile_rows;
pub use remarks::{RemarkGenerator, derive_labels, generate_remarks};
pub use stage::{RowDiagnostics, RowStage};
