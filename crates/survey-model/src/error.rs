use std::path::PathBuf;

use thiserror::Error;

/// Fatal, whole-run failure while building the dataset profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read dataset {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("dataset has no columns")]
    NoColumns,

    #[error("dataset has no records")]
    Empty,
}

/// Unexpected fault while transforming one row.
///
/// Anticipated data-quality issues (cast failures, unparseable dates) are
/// recovered inside the stages and never surface as this error.
#[derive(Debug, Error)]
pub enum RowProcessingError {
    #[error("mean {mean} of column {column} cannot be represented as {target}")]
    UnrepresentableMean {
        column: String,
        mean: f64,
        target: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            message: message.into(),
        }
    }
}
