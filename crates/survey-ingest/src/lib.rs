//! Row codec and CSV loading for health-survey datasets.

pub mod codec;
pub mod dataset;
pub mod error;

pub use codec::{RowCodec, format_row};
pub use dataset::{Dataset, read_dataset, write_dataset};
pub use error::IngestError;
