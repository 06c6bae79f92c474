use std::path::PathBuf;

use survey_model::DatasetProfile;
use survey_transform::RunSummary;

/// Where the column profile used for imputation came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    Computed,
    Loaded(PathBuf),
}

#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    /// `None` for dry runs.
    pub output: Option<PathBuf>,
    pub profile_source: ProfileSource,
    pub stages: [&'static str; 3],
    pub summary: RunSummary,
    pub duration_ms: u64,
}

#[derive(Debug)]
pub struct ProfileResult {
    pub input: PathBuf,
    pub profile: DatasetProfile,
    pub saved_to: Option<PathBuf>,
}
