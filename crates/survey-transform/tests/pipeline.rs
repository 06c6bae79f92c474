//! End-to-end tests: codec → profiler → pipeline → executor.

use std::sync::Arc;

use survey_ingest::RowCodec;
use survey_model::{
    DatasetProfile, Header, PipelineConfig, Row, RowErrorPolicy, Value, default_missing_tokens,
};
use survey_transform::{ExecuteError, ExecuteOptions, RowPipeline, execute, profile_rows};

const HEADER: &str = "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Outcome,Date";

fn load(lines: &[&str]) -> (Header, Vec<Row>) {
    let header = Header::new(HEADER.split(',').map(ToString::to_string).collect());
    let codec = RowCodec::new(header.clone(), &default_missing_tokens());
    let rows = lines
        .iter()
        .map(|line| codec.parse_line(line).expect("parse line"))
        .collect();
    (header, rows)
}

fn run(lines: &[&str]) -> Vec<Row> {
    let (header, rows) = load(lines);
    let profile = profile_rows(&header, &rows).expect("profile");
    let pipeline = RowPipeline::from_config(Arc::new(profile), &PipelineConfig::default());
    execute(&pipeline, rows, ExecuteOptions::default())
        .expect("execute")
        .rows
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

#[test]
fn all_flags_and_missing_date() {
    let rows = run(&[
        "6,180,95,35,0,35,0.627,50,1,",
        "1,85,66,29,0,26.6,0.351,31,0,2023-02-10",
    ]);
    let first = &rows[0];
    assert_eq!(
        first.get("Remarks"),
        Some(&text(
            "Positive Diabetes Test; High Glucose Level; Obesity; High Blood Pressure"
        ))
    );
    assert_eq!(first.get("Date"), Some(&Value::Missing));
}

#[test]
fn low_glucose_keeps_canonical_date() {
    let rows = run(&[
        "1,60,70,20,0,22,0.2,25,0,2023-02-10",
        "3,120,80,30,90,31.5,0.5,40,1,05/01/2023",
    ]);
    let first = &rows[0];
    assert_eq!(
        first.get("Remarks"),
        Some(&text("Negative Diabetes Test; Low Glucose Level"))
    );
    assert_eq!(first.get("Date"), Some(&text("2023-02-10")));
    assert_eq!(rows[1].get("Date"), Some(&text("2023-05-01")));
}

#[test]
fn missing_glucose_promotes_whole_numbers_to_float() {
    let rows = run(&[
        "1,100,70,20,0,22.0,0.2,25,0,2023-01-01",
        "2,141,70,20,0,22.0,0.2,25,0,2023-01-02",
        "3,,70,20,0,22.0,0.2,25,0,2023-01-03",
    ]);
    assert_eq!(rows[0].get("Glucose"), Some(&Value::Float(100.0)));
    assert_eq!(rows[2].get("Glucose"), Some(&Value::Float(120.5)));
    assert_eq!(rows[2].get("Pregnancies"), Some(&Value::Integer(3)));
}

#[test]
fn missing_float_glucose_is_rounded_mean() {
    let rows = run(&[
        "1,100.0,70,20,0,22.0,0.2,25,0,2023-01-01",
        "2,141.0,70,20,0,22.0,0.2,25,0,2023-01-02",
        "3,NA,70,20,0,22.0,0.2,25,0,2023-01-03",
    ]);
    assert_eq!(rows[2].get("Glucose"), Some(&Value::Float(120.5)));
}

#[test]
fn one_output_row_per_input_row_in_order() {
    let lines: Vec<String> = (0..200)
        .map(|i| format!("{},{},70,20,0,22.0,0.2,25,{},", i, 60 + i, i % 2))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let rows = run(&refs);
    assert_eq!(rows.len(), 200);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.get("Pregnancies"), Some(&Value::Integer(i as i64)));
    }
}

#[test]
fn unparseable_dates_are_recovered_and_counted() {
    let (header, rows) = load(&[
        "1,100,70,20,0,22.0,0.2,25,0,2023-13-01",
        "1,100,70,20,0,22.0,0.2,25,0,31/04/2023",
        "1,100,70,20,0,22.0,0.2,25,0,04/30/2023",
    ]);
    let profile = profile_rows(&header, &rows).expect("profile");
    let pipeline = RowPipeline::from_config(Arc::new(profile), &PipelineConfig::default());
    let output = execute(&pipeline, rows, ExecuteOptions::default()).expect("execute");
    assert_eq!(output.summary.unparseable_dates, 2);
    assert_eq!(output.summary.rows_written, 3);
    assert_eq!(output.rows[2].get("Date"), Some(&text("2023-04-30")));
}

fn poisoned_profile(header: &Header, rows: &[Row]) -> DatasetProfile {
    let mut profile = profile_rows(header, rows).expect("profile");
    if let Some(insulin) = profile.columns.get_mut("Insulin") {
        insulin.mean = Some(f64::INFINITY);
    }
    profile
}

#[test]
fn fail_policy_aborts_on_first_faulty_row() {
    let (header, rows) = load(&[
        "1,100,70,20,10,22.0,0.2,25,0,2023-01-01",
        "1,100,70,20,,22.0,0.2,25,0,2023-01-01",
    ]);
    let profile = poisoned_profile(&header, &rows);
    let pipeline = RowPipeline::from_config(Arc::new(profile), &PipelineConfig::default());
    let error = execute(&pipeline, rows, ExecuteOptions::default()).expect_err("should fail");
    assert!(matches!(error, ExecuteError::Row { index: 1, .. }));
}

#[test]
fn skip_policy_drops_only_faulty_rows() {
    let (header, rows) = load(&[
        "1,100,70,20,10,22.0,0.2,25,0,2023-01-01",
        "1,100,70,20,,22.0,0.2,25,0,2023-01-01",
        "1,150,70,20,12,22.0,0.2,25,1,2023-01-01",
    ]);
    let profile = poisoned_profile(&header, &rows);
    let pipeline = RowPipeline::from_config(Arc::new(profile), &PipelineConfig::default());
    let options = ExecuteOptions {
        jobs: 2,
        on_error: RowErrorPolicy::Skip,
    };
    let output = execute(&pipeline, rows, options).expect("execute");
    assert_eq!(output.rows.len(), 2);
    assert_eq!(output.summary.rows_read, 3);
    assert_eq!(output.summary.rows_skipped, 1);
    assert_eq!(output.summary.labels.get("Positive Diabetes Test"), Some(&1));
    assert_eq!(output.summary.labels.get("High Glucose Level"), Some(&1));
}
