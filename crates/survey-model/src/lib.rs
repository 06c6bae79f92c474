//! Data model for the health-survey cleaning pipeline.

pub mod config;
pub mod dates;
pub mod error;
pub mod profile;
pub mod remarks;
pub mod row;
pub mod value;

pub use config::{PipelineConfig, RowErrorPolicy, default_missing_tokens};
pub use dates::{CANONICAL_DATE_FORMAT, DatePattern};
pub use error::{ConfigError, ProfileError, RowProcessingError};
pub use profile::{ColumnKind, ColumnProfile, DatasetProfile, NumericType, round2};
pub use remarks::{REMARK_SEPARATOR, RemarkRules};
pub use row::{Header, Row};
pub use value::{Value, format_float};
