use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical output pattern for normalized dates.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Candidate input date layout, tried in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatePattern {
    /// `YYYY-MM-DD`
    Iso,
    /// `MM/DD/YYYY`
    Us,
    /// `DD/MM/YYYY`
    DayFirst,
}

impl DatePattern {
    /// Fixed priority used when nothing else is configured.
    pub const DEFAULT_ORDER: [DatePattern; 3] =
        [DatePattern::Iso, DatePattern::Us, DatePattern::DayFirst];

    /// chrono format string for this layout.
    pub fn format(self) -> &'static str {
        match self {
            DatePattern::Iso => "%Y-%m-%d",
            DatePattern::Us => "%m/%d/%Y",
            DatePattern::DayFirst => "%d/%m/%Y",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DatePattern::Iso => "iso",
            DatePattern::Us => "us",
            DatePattern::DayFirst => "day-first",
        }
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatePattern {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(DatePattern::Iso),
            "us" => Ok(DatePattern::Us),
            "day-first" | "dayfirst" | "eu" => Ok(DatePattern::DayFirst),
            other => Err(format!("unknown date pattern: {other}")),
        }
    }
}
