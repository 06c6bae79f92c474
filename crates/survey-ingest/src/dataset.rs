use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, warn};

use survey_model::{Header, Row};

use crate::IngestError;
use crate::codec::{RowCodec, normalize_header};

/// A fully loaded dataset: header plus one row per record.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub header: Header,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a comma-delimited file whose first line is the header.
///
/// Records shorter than the header are padded with missing cells; longer
/// records are truncated. Both cases are logged.
pub fn read_dataset(path: &Path, missing_tokens: &[String]) -> Result<Dataset, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => {
            let record = record.map_err(|source| IngestError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Header::new(record.iter().map(normalize_header).collect())
        }
        None => {
            return Ok(Dataset {
                header: Header::new(Vec::new()),
                rows: Vec::new(),
            });
        }
    };

    let codec = RowCodec::new(header, missing_tokens);
    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        check_width(&record, codec.header().len());
        rows.push(codec.parse_record(&record));
    }
    debug!(
        path = %path.display(),
        columns = codec.header().len(),
        records = rows.len(),
        "dataset loaded"
    );
    Ok(Dataset {
        header: codec.header().clone(),
        rows,
    })
}

fn check_width(record: &StringRecord, expected: usize) {
    if record.len() == expected {
        return;
    }
    let line = record.position().map_or(0, csv::Position::line);
    if record.len() < expected {
        warn!(line, fields = record.len(), expected, "short record padded with missing values");
    } else {
        warn!(line, fields = record.len(), expected, "long record truncated to header width");
    }
}

/// Write `rows` under `header` to `path`.
///
/// Data goes to a sibling `.partial` file that is renamed into place only
/// once every row has been written, so a failed run leaves no output. The
/// `.partial` file is removed again when any step fails.
pub fn write_dataset(path: &Path, header: &Header, rows: &[Row]) -> Result<usize, IngestError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let partial = partial_path(path);
    let result = write_partial(&partial, header, rows).and_then(|()| {
        fs::rename(&partial, path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })
    });
    if let Err(error) = result {
        if let Err(cleanup) = fs::remove_file(&partial) {
            debug!(path = %partial.display(), error = %cleanup, "partial output not removed");
        }
        return Err(error);
    }
    Ok(rows.len())
}

fn write_partial(partial: &Path, header: &Header, rows: &[Row]) -> Result<(), IngestError> {
    let write_error = |source: csv::Error| IngestError::Write {
        path: partial.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_path(partial)
        .map_err(write_error)?;
    writer.write_record(header.iter()).map_err(write_error)?;
    for row in rows {
        writer
            .write_record(row.rendered(header))
            .map_err(write_error)?;
    }
    writer.flush().map_err(|source| IngestError::Io {
        path: partial.to_path_buf(),
        source,
    })
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
