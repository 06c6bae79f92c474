//! Clinical remark rule set.

use serde::{Deserialize, Serialize};

pub const POSITIVE_TEST: &str = "Positive Diabetes Test";
pub const NEGATIVE_TEST: &str = "Negative Diabetes Test";
pub const HIGH_GLUCOSE: &str = "High Glucose Level";
pub const LOW_GLUCOSE: &str = "Low Glucose Level";
pub const OBESITY: &str = "Obesity";
pub const HIGH_BLOOD_PRESSURE: &str = "High Blood Pressure";

/// Separator placed between labels in the remarks column.
pub const REMARK_SEPARATOR: &str = "; ";

/// Columns and thresholds read by the remark generator.
///
/// The comparison operators are fixed; only the columns and the cut-off
/// values are configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemarkRules {
    pub outcome_column: String,
    pub glucose_column: String,
    pub bmi_column: String,
    pub blood_pressure_column: String,
    /// Outcome value that marks a positive test.
    pub positive_outcome: f64,
    /// Glucose strictly above this is high.
    pub high_glucose: f64,
    /// Glucose strictly below this is low.
    pub low_glucose: f64,
    /// BMI at or above this is obese.
    pub obesity_bmi: f64,
    /// Blood pressure strictly above this is high.
    pub high_blood_pressure: f64,
}

impl Default for RemarkRules {
    fn default() -> Self {
        Self {
            outcome_column: "Outcome".to_string(),
            glucose_column: "Glucose".to_string(),
            bmi_column: "BMI".to_string(),
            blood_pressure_column: "BloodPressure".to_string(),
            positive_outcome: 1.0,
            high_glucose: 140.0,
            low_glucose: 70.0,
            obesity_bmi: 30.0,
            high_blood_pressure: 90.0,
        }
    }
}

impl RemarkRules {
    /// Columns the rules read, in evaluation order.
    pub fn columns(&self) -> [&str; 4] {
        [
            self.outcome_column.as_str(),
            self.glucose_column.as_str(),
            self.bmi_column.as_str(),
            self.blood_pressure_column.as_str(),
        ]
    }
}
