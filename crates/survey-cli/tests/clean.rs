//! End-to-end runs of the `clean` and `profile` commands on temporary files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use survey_cli::cli::{CleanArgs, ProfileArgs};
use survey_cli::commands::{clean_config, load_profile, run_clean, run_profile};
use survey_cli::types::ProfileSource;
use survey_model::{ColumnKind, NumericType, RowErrorPolicy};

const SURVEY: &str = "\
Pregnancies,Glucose,BloodPressure,BMI,Outcome,Date
6,148,72,33.6,1,2023-01-15
1,,66,26.6,0,01/05/2023
8,183,,23.3,1,31/12/2023
";

const CLEANED: &str = "\
Pregnancies,Glucose,BloodPressure,BMI,Outcome,Date,Remarks
6,148.0,72.0,33.6,1,2023-01-15,Positive Diabetes Test; High Glucose Level; Obesity
1,165.5,66.0,26.6,0,2023-01-05,Negative Diabetes Test; High Glucose Level
8,183.0,69.0,23.3,1,2023-12-31,Positive Diabetes Test; High Glucose Level
";

fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("diabetes_data.csv");
    fs::write(&path, contents).expect("write input");
    path
}

fn clean_args(input: &Path, output: &Path) -> CleanArgs {
    CleanArgs {
        input: Some(input.to_path_buf()),
        output: Some(output.to_path_buf()),
        jobs: Some(2),
        ..CleanArgs::default()
    }
}

#[test]
fn clean_writes_imputed_dated_and_remarked_rows() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SURVEY);
    let output = dir.path().join("out").join("cleaned_diabetes_data.csv");

    let result = run_clean(&clean_args(&input, &output)).expect("clean");

    assert_eq!(fs::read_to_string(&output).expect("read output"), CLEANED);
    assert_eq!(result.output.as_deref(), Some(output.as_path()));
    assert_eq!(result.profile_source, ProfileSource::Computed);
    assert_eq!(result.stages, ["impute", "normalize_date", "generate_remarks"]);
    assert_eq!(result.summary.rows_read, 3);
    assert_eq!(result.summary.rows_written, 3);
    assert_eq!(result.summary.imputed_values, 2);
    assert_eq!(result.summary.unparseable_dates, 0);
    assert_eq!(result.summary.labels.get("Positive Diabetes Test"), Some(&2));
    assert_eq!(result.summary.labels.get("High Glucose Level"), Some(&3));
    assert_eq!(result.summary.labels.get("Obesity"), Some(&1));
    assert!(!output.with_file_name("cleaned_diabetes_data.csv.partial").exists());
}

#[test]
fn dry_run_leaves_no_output() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SURVEY);
    let args = CleanArgs {
        input: Some(input),
        dry_run: true,
        ..CleanArgs::default()
    };

    let result = run_clean(&args).expect("dry run");
    assert!(result.output.is_none());
    assert_eq!(result.summary.rows_written, 3);
    assert_eq!(fs::read_dir(dir.path()).expect("list").count(), 1);
}

#[test]
fn existing_remarks_column_aborts_before_writing() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "Glucose,Remarks\n150,old\n");
    let output = dir.path().join("cleaned.csv");

    let error = run_clean(&clean_args(&input, &output)).expect_err("collision");
    assert!(format!("{error:#}").contains("already exists"));
    assert!(!output.exists());
}

#[test]
fn header_only_input_is_a_profile_error() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "Glucose,BMI\n");
    let output = dir.path().join("cleaned.csv");

    let error = run_clean(&clean_args(&input, &output)).expect_err("empty dataset");
    assert!(format!("{error:#}").contains("no records"));
    assert!(!output.exists());
}

#[test]
fn missing_input_file_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("absent.csv");
    let output = dir.path().join("cleaned.csv");

    let error = run_clean(&clean_args(&input, &output)).expect_err("missing input");
    assert!(format!("{error:#}").contains("failed to read dataset"));
}

#[test]
fn output_path_is_required_unless_dry_run() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SURVEY);
    let args = CleanArgs {
        input: Some(input),
        ..CleanArgs::default()
    };

    let error = run_clean(&args).expect_err("no output");
    assert!(format!("{error:#}").contains("no output path"));
}

#[test]
fn config_file_thresholds_and_overrides() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SURVEY);
    let output = dir.path().join("cleaned.csv");
    let config_path = dir.path().join("survey.toml");
    fs::write(
        &config_path,
        format!(
            "input = {:?}\noutput = {:?}\non_row_error = \"fail\"\n\n[remarks]\nhigh_glucose = 170\n",
            input.display().to_string(),
            output.display().to_string(),
        ),
    )
    .expect("write config");

    let args = CleanArgs::try_parse_from([
        "clean",
        "--config",
        config_path.to_str().expect("utf-8 path"),
        "--skip-failed-rows",
        "--jobs",
        "1",
    ])
    .expect("parse args");
    let config = clean_config(&args).expect("config");
    assert_eq!(config.on_row_error, RowErrorPolicy::Skip);
    assert_eq!(config.jobs, 1);
    assert_eq!(config.remarks.high_glucose, 170.0);

    run_clean(&args).expect("clean");
    let cleaned = fs::read_to_string(&output).expect("read output");
    let remarks: Vec<&str> = cleaned
        .lines()
        .skip(1)
        .filter_map(|line| line.rsplit(',').next())
        .collect();
    assert_eq!(
        remarks,
        vec![
            "Positive Diabetes Test; Obesity",
            "Negative Diabetes Test",
            "Positive Diabetes Test; High Glucose Level",
        ]
    );
}

#[test]
fn saved_profile_is_reused_by_clean() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SURVEY);
    let profile_path = dir.path().join("profile").join("diabetes.json");

    let profiled = run_profile(&ProfileArgs {
        input: input.clone(),
        config: None,
        output: Some(profile_path.clone()),
    })
    .expect("profile");
    let glucose = profiled.profile.get("Glucose").expect("glucose profile");
    assert_eq!(glucose.kind, ColumnKind::Numeric(NumericType::Float));
    assert_eq!(glucose.mean, Some(165.5));
    assert_eq!(
        profiled.profile.get("Pregnancies").map(|p| p.kind),
        Some(ColumnKind::Numeric(NumericType::Integer))
    );
    assert_eq!(
        profiled.profile.get("BMI").map(|p| p.kind),
        Some(ColumnKind::Numeric(NumericType::Float))
    );

    let loaded = load_profile(&profile_path).expect("load profile");
    assert_eq!(loaded, profiled.profile);

    let output = dir.path().join("cleaned.csv");
    let args = CleanArgs {
        profile: Some(profile_path.clone()),
        ..clean_args(&input, &output)
    };
    let result = run_clean(&args).expect("clean with profile");
    assert_eq!(result.profile_source, ProfileSource::Loaded(profile_path));
    assert_eq!(fs::read_to_string(&output).expect("read output"), CLEANED);
}
