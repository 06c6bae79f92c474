//! Tests for survey-model types.

use std::collections::BTreeMap;
use std::fs;

use survey_model::{
    ColumnKind, ColumnProfile, ConfigError, DatasetProfile, DatePattern, Header, NumericType,
    PipelineConfig, RowErrorPolicy, Value,
};

#[test]
fn loads_partial_config_with_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("pipeline.toml");
    fs::write(
        &path,
        r#"
input = "data/diabetes_data.csv"
date_column = "VisitDate"
date_patterns = ["day-first", "iso"]
on_row_error = "skip"

[remarks]
high_glucose = 150
"#,
    )
    .expect("write config");

    let config = PipelineConfig::load(&path).expect("load config");
    assert_eq!(config.date_column, "VisitDate");
    assert_eq!(
        config.date_patterns,
        vec![DatePattern::DayFirst, DatePattern::Iso]
    );
    assert_eq!(config.on_row_error, RowErrorPolicy::Skip);
    assert_eq!(config.remarks.high_glucose, 150.0);
    assert_eq!(config.remarks.low_glucose, 70.0);
    assert_eq!(config.remarks_column, "Remarks");
    assert!(config.output.is_none());
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("pipeline.toml");
    fs::write(&path, "date_colum = \"Date\"\n").expect("write config");

    let error = PipelineConfig::load(&path).expect_err("typo should fail");
    assert!(matches!(error, ConfigError::Toml { .. }));
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = PipelineConfig::load(&dir.path().join("absent.toml")).expect_err("missing");
    assert!(matches!(error, ConfigError::Io { .. }));
}

#[test]
fn profile_round_trips_through_json() {
    let header = Header::new(vec!["Glucose".to_string(), "Date".to_string()]);
    let mut columns = BTreeMap::new();
    columns.insert(
        "Glucose".to_string(),
        ColumnProfile::numeric(NumericType::Integer, 120.5, 3, 1),
    );
    columns.insert("Date".to_string(), ColumnProfile::text(4, 0));
    let profile = DatasetProfile {
        header,
        row_count: 4,
        columns,
    };

    let json = serde_json::to_string(&profile).expect("serialize profile");
    let round: DatasetProfile = serde_json::from_str(&json).expect("deserialize profile");
    assert_eq!(round, profile);
    assert_eq!(
        round.get("Glucose").map(|p| p.kind),
        Some(ColumnKind::Numeric(NumericType::Integer))
    );
}

#[test]
fn value_serializes_with_kind_tag() {
    let json = serde_json::to_string(&Value::Float(33.6)).expect("serialize value");
    assert_eq!(json, r#"{"kind":"Float","value":33.6}"#);
    let missing = serde_json::to_string(&Value::Missing).expect("serialize missing");
    assert_eq!(missing, r#"{"kind":"Missing"}"#);
}
