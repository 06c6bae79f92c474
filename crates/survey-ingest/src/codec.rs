//! Row codec: tokenizes delimited lines into rows keyed by header names and
//! renders rows back to delimited text.

use std::collections::BTreeSet;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use survey_model::{Header, Row, Value};

use crate::IngestError;

/// Trim surrounding whitespace and any stray byte-order mark.
pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

#[derive(Debug, Clone)]
pub struct RowCodec {
    header: Header,
    missing_tokens: BTreeSet<String>,
}

impl RowCodec {
    pub fn new(header: Header, missing_tokens: &[String]) -> Self {
        Self {
            header,
            missing_tokens: missing_tokens
                .iter()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Map one raw field to a cell. Empty fields and configured sentinels are
    /// missing; everything else stays text until imputation casts it.
    pub fn cell(&self, raw: &str) -> Value {
        let normalized = normalize_cell(raw);
        if normalized.is_empty() || self.missing_tokens.contains(&normalized) {
            Value::Missing
        } else {
            Value::Text(normalized)
        }
    }

    pub fn parse_record(&self, record: &StringRecord) -> Row {
        Row::from_values(&self.header, record.iter().map(|field| self.cell(field)))
    }

    /// Tokenize a single comma-delimited line (quotes honored) and zip it
    /// with the header.
    pub fn parse_line(&self, line: &str) -> Result<Row, IngestError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());
        let mut record = StringRecord::new();
        let found = reader
            .read_record(&mut record)
            .map_err(IngestError::Tokenize)?;
        if !found {
            return Ok(Row::from_values(&self.header, std::iter::empty()));
        }
        Ok(self.parse_record(&record))
    }
}

/// Render a row as one delimited line in `header` order. Missing cells and
/// columns the row lacks render as empty fields.
pub fn format_row(row: &Row, header: &Header) -> Result<String, IngestError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(row.rendered(header))
        .map_err(|error| IngestError::Format(error.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|error| IngestError::Format(error.to_string()))?;
    let line = String::from_utf8(bytes).map_err(|error| IngestError::Format(error.to_string()))?;
    Ok(line.trim_end_matches('\n').to_string())
}
