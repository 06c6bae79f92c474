//! Pipeline configuration loaded from TOML.
//!
//! Every key is optional. An empty file yields the default behavior: the
//! `Date` column is normalized with the ISO, US, day-first priority and the
//! remarks are written to a trailing `Remarks` column.
//!
//! ```toml
//! input = "data/diabetes_data.csv"
//! output = "out/cleaned_diabetes_data.csv"
//! date_column = "Date"
//! date_patterns = ["iso", "us", "day-first"]
//! jobs = 4
//! on_row_error = "skip"
//!
//! [remarks]
//! glucose_column = "Glucose"
//! high_glucose = 140
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, DatePattern, Header, RemarkRules};

/// What the executor does with a row whose processing failed unexpectedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorPolicy {
    /// Abort the run; nothing is written.
    #[default]
    Fail,
    /// Drop the row and keep going.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub date_column: String,
    pub date_patterns: Vec<DatePattern>,
    pub remarks_column: String,
    /// Tokens read as missing in addition to the empty string.
    pub missing_tokens: Vec<String>,
    /// Worker threads for row processing; 0 uses one per CPU.
    pub jobs: usize,
    pub on_row_error: RowErrorPolicy,
    pub remarks: RemarkRules,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            date_column: "Date".to_string(),
            date_patterns: DatePattern::DEFAULT_ORDER.to_vec(),
            remarks_column: "Remarks".to_string(),
            missing_tokens: default_missing_tokens(),
            jobs: 0,
            on_row_error: RowErrorPolicy::Fail,
            remarks: RemarkRules::default(),
        }
    }
}

pub fn default_missing_tokens() -> Vec<String> {
    ["NA", "N/A", "NaN", "nan", "NULL", "null"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl PipelineConfig {
    /// Load a config file, falling back to defaults for absent keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PipelineConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that do not need the dataset.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.date_patterns.is_empty() {
            return Err(ConfigError::invalid("date_patterns must not be empty"));
        }
        if self.date_column.trim().is_empty() {
            return Err(ConfigError::invalid("date_column must not be empty"));
        }
        if self.remarks_column.trim().is_empty() {
            return Err(ConfigError::invalid("remarks_column must not be empty"));
        }
        if self.remarks_column == self.date_column {
            return Err(ConfigError::invalid(
                "remarks_column and date_column must differ",
            ));
        }
        Ok(())
    }

    /// Checks against the input header. Missing rule columns are allowed; the
    /// rules that read them simply never fire.
    pub fn validate_header(&self, header: &Header) -> Result<(), ConfigError> {
        if header.contains(&self.remarks_column) {
            return Err(ConfigError::invalid(format!(
                "remarks column {} already exists in the input header",
                self.remarks_column
            )));
        }
        Ok(())
    }

    pub fn input_path(&self) -> Result<&Path, ConfigError> {
        self.input
            .as_deref()
            .ok_or_else(|| ConfigError::invalid("no input path given (set `input` or --input)"))
    }

    pub fn output_path(&self) -> Result<&Path, ConfigError> {
        self.output
            .as_deref()
            .ok_or_else(|| ConfigError::invalid("no output path given (set `output` or --output)"))
    }
}
