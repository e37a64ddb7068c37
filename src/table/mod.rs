//! The metadata table: CSV serialization of dataset records
//!
//! Stage one writes the table, stage two reads it back. The column set is
//! fixed; multiple download URLs for one dataset are joined with `|` inside
//! the `download_urls` field (`|` cannot appear unencoded in a URL, so the
//! separator is unambiguous).

mod csv;

pub use csv::{parse_rows, write_row};

use crate::record::DatasetRecord;
use crate::TableError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column names of the metadata CSV, in on-disk order
pub const COLUMNS: [&str; 10] = [
    "name",
    "url",
    "description",
    "characteristics",
    "subject_area",
    "associated_tasks",
    "feature_types",
    "instances",
    "features",
    "download_urls",
];

/// Separator between multiple download URLs within one field
const URL_SEPARATOR: char = '|';

fn record_to_row(record: &DatasetRecord) -> Vec<String> {
    vec![
        record.name.clone(),
        record.url.clone(),
        record.description.clone(),
        record.characteristics.clone(),
        record.subject_area.clone(),
        record.associated_tasks.clone(),
        record.feature_types.clone(),
        record.instances.clone(),
        record.features.clone(),
        record
            .download_urls
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&URL_SEPARATOR.to_string()),
    ]
}

fn row_to_record(row: &[String], line: usize) -> Result<DatasetRecord, TableError> {
    if row.len() != COLUMNS.len() {
        return Err(TableError::MalformedRow {
            line,
            message: format!("expected {} fields, got {}", COLUMNS.len(), row.len()),
        });
    }

    Ok(DatasetRecord {
        name: row[0].clone(),
        url: row[1].clone(),
        description: row[2].clone(),
        characteristics: row[3].clone(),
        subject_area: row[4].clone(),
        associated_tasks: row[5].clone(),
        feature_types: row[6].clone(),
        instances: row[7].clone(),
        features: row[8].clone(),
        download_urls: row[9]
            .split(URL_SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Writes the metadata table to the given path, creating parent directories
///
/// # Arguments
///
/// * `records` - The dataset records to serialize, one row each
/// * `path` - Destination CSV path
pub fn write_metadata(records: &[DatasetRecord], path: &Path) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    write_row(&mut writer, &header)?;

    for record in records {
        write_row(&mut writer, &record_to_row(record))?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a metadata table written by [`write_metadata`]
///
/// The header row is checked against the expected column set so a stale or
/// foreign file fails loudly instead of producing garbage records.
pub fn read_metadata(path: &Path) -> Result<Vec<DatasetRecord>, TableError> {
    let content = fs::read_to_string(path)?;
    let mut rows = parse_rows(&content).into_iter();

    let header = rows.next().ok_or(TableError::MissingHeader)?;
    for expected in COLUMNS {
        if !header.iter().any(|h| h == expected) {
            return Err(TableError::MissingColumn(expected.to_string()));
        }
    }

    let mut records = Vec::new();
    for (i, row) in rows.enumerate() {
        // Line numbers are 1-based and the header is line 1
        records.push(row_to_record(&row, i + 2)?);
    }

    Ok(records)
}
