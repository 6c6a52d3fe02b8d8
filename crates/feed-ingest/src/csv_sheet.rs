//! Catalog sheets exported as CSV.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use feed_model::{RawRow, columns};

use crate::error::SourceError;
use crate::source::{RowSource, SourceRows};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read one sheet export. The first record is the header row.
pub fn read_sheet(path: &Path) -> Result<Vec<RawRow>, SourceError> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SourceError::csv(path, e))?;
    read_records(reader, path)
}

/// Read a sheet from any reader; `label` names it in errors.
pub fn read_sheet_from_reader<R: Read>(reader: R, label: &str) -> Result<Vec<RawRow>, SourceError> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    read_records(reader, Path::new(label))
}

fn read_records<R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<RawRow>, SourceError> {
    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| SourceError::csv(path, e))?
            .iter()
            .map(normalize_header)
            .collect(),
        None => return Ok(Vec::new()),
    };
    if !headers.iter().any(|h| h == columns::PRODUCT_CODE) {
        return Err(SourceError::MissingColumn {
            sheet: path.display().to_string(),
            column: columns::PRODUCT_CODE,
        });
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| SourceError::csv(path, e))?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.is_empty())
            .map(|(idx, header)| {
                let value = record.get(idx).unwrap_or("");
                (header.clone(), normalize_cell(value))
            })
            .collect();
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }
    debug!(sheet = %path.display(), rows = rows.len(), "sheet loaded");
    Ok(rows)
}

/// Primary and optional secondary sheet exports on disk.
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    pub primary: PathBuf,
    pub secondary: Option<PathBuf>,
}

impl CsvRowSource {
    pub fn new(primary: impl Into<PathBuf>, secondary: Option<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            secondary,
        }
    }
}

impl RowSource for CsvRowSource {
    fn fetch(&self) -> Result<SourceRows, SourceError> {
        let primary = read_sheet(&self.primary)?;
        let secondary = match &self.secondary {
            Some(path) => read_sheet(path)?,
            None => Vec::new(),
        };
        Ok(SourceRows { primary, secondary })
    }

    fn describe(&self) -> String {
        match &self.secondary {
            Some(secondary) => format!(
                "{} + {}",
                self.primary.display(),
                secondary.display()
            ),
            None => self.primary.display().to_string(),
        }
    }
}
