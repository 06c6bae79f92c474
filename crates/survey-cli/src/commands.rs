use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use survey_ingest::{Dataset, read_dataset, write_dataset};
use survey_model::{DatasetProfile, PipelineConfig, ProfileError, RowErrorPolicy};
use survey_transform::{ExecuteOptions, RowPipeline, execute, profile_rows};

use crate::cli::{CleanArgs, ProfileArgs};
use crate::types::{CleanResult, ProfileResult, ProfileSource};

/// Load the config file when one is given, otherwise start from defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            PipelineConfig::load(path).with_context(|| format!("load config {}", path.display()))
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// Config for a `clean` run: file values first, then command-line overrides.
pub fn clean_config(args: &CleanArgs) -> Result<PipelineConfig> {
    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(input) = &args.input {
        config.input = Some(input.clone());
    }
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }
    if let Some(column) = &args.date_column {
        config.date_column.clone_from(column);
    }
    if let Some(column) = &args.remarks_column {
        config.remarks_column.clone_from(column);
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    if args.skip_failed_rows {
        config.on_row_error = RowErrorPolicy::Skip;
    }
    config.validate().context("validate config")?;
    Ok(config)
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let started = Instant::now();
    let config = clean_config(args)?;
    let input = config.input_path()?.to_path_buf();
    // Resolve the output before any work so a missing path fails fast.
    let output = if args.dry_run {
        None
    } else {
        Some(config.output_path()?.to_path_buf())
    };
    let clean_span = info_span!("clean", input = %input.display());
    let _clean_guard = clean_span.enter();

    let dataset = load_dataset(&input, &config.missing_tokens)?;
    config.validate_header(&dataset.header)?;

    let (profile, profile_source) = match &args.profile {
        Some(path) => {
            let profile = load_profile(path)?;
            if profile.header != dataset.header {
                warn!(
                    profile = %path.display(),
                    "saved profile header differs from the input header; unprofiled columns are copied as text"
                );
            }
            (profile, ProfileSource::Loaded(path.clone()))
        }
        None => (build_profile(&dataset)?, ProfileSource::Computed),
    };

    let pipeline = RowPipeline::from_config(Arc::new(profile), &config);
    let options = ExecuteOptions {
        jobs: config.jobs,
        on_error: config.on_row_error,
    };
    let run = {
        let span = info_span!("process", rows = dataset.len());
        let _guard = span.enter();
        let start = Instant::now();
        let run = execute(&pipeline, dataset.rows, options).context("process rows")?;
        info!(
            rows = run.summary.rows_written,
            skipped = run.summary.rows_skipped,
            duration_ms = start.elapsed().as_millis(),
            "processing complete"
        );
        run
    };

    if let Some(path) = &output {
        let span = info_span!("write", output = %path.display());
        let _guard = span.enter();
        let start = Instant::now();
        let header = dataset.header.with_column(pipeline.remarks_column());
        let written = write_dataset(path, &header, &run.rows)
            .with_context(|| format!("write {}", path.display()))?;
        info!(
            rows = written,
            duration_ms = start.elapsed().as_millis(),
            "output written"
        );
    } else {
        info!("dry run, output not written");
    }

    Ok(CleanResult {
        input,
        output,
        profile_source,
        stages: pipeline.stage_names(),
        summary: run.summary,
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}

pub fn run_profile(args: &ProfileArgs) -> Result<ProfileResult> {
    let config = resolve_config(args.config.as_deref())?;
    let dataset = load_dataset(&args.input, &config.missing_tokens)?;
    let profile = build_profile(&dataset)?;
    if let Some(path) = &args.output {
        save_profile(path, &profile)?;
    }
    Ok(ProfileResult {
        input: args.input.clone(),
        profile,
        saved_to: args.output.clone(),
    })
}

fn load_dataset(path: &Path, missing_tokens: &[String]) -> Result<Dataset> {
    let dataset = read_dataset(path, missing_tokens).map_err(|error| ProfileError::Unreadable {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;
    info!(
        path = %path.display(),
        columns = dataset.header.len(),
        rows = dataset.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn build_profile(dataset: &Dataset) -> Result<DatasetProfile> {
    let span = info_span!("profile", rows = dataset.len());
    let _guard = span.enter();
    let start = Instant::now();
    let profile = profile_rows(&dataset.header, &dataset.rows).context("profile dataset")?;
    info!(
        numeric = profile.numeric_columns().count(),
        duration_ms = start.elapsed().as_millis(),
        "profile complete"
    );
    Ok(profile)
}

pub fn load_profile(path: &Path) -> Result<DatasetProfile> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read profile {}", path.display()))?;
    let profile: DatasetProfile = serde_json::from_str(&contents)
        .with_context(|| format!("parse profile {}", path.display()))?;
    if profile.header.is_empty() {
        bail!("profile {} has no columns", path.display());
    }
    Ok(profile)
}

pub fn save_profile(path: &Path, profile: &DatasetProfile) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(profile).context("serialize profile")?;
    fs::write(path, json).with_context(|| format!("write profile {}", path.display()))?;
    info!(path = %path.display(), "profile saved");
    Ok(())
}
