//! CSV loader for the historical service dataset
//!
//! UTF-8 with an optional byte order mark. Columns are matched by header
//! name; only the plate column is required and unknown columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::UTF_8;
use thiserror::Error;
use tracing::{debug, info, warn};

use truckcare_domain::model::TruckRecord;

#[derive(Error, Debug)]
pub enum CsvLoaderError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid date in row {row}, column {column}: {value}")]
    InvalidDate {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid number in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<CsvLoaderError> for truckcare_types::Error {
    fn from(e: CsvLoaderError) -> Self {
        match e {
            CsvLoaderError::IoError(io) => truckcare_types::Error::Io(io),
            other => truckcare_types::Error::CsvLoader(other.to_string()),
        }
    }
}

const PLATE_COLUMNS: [&str; 2] = ["truck_number_plate", "plate"];
const DATE_COLUMNS: [&str; 2] = ["service_date", "last_service_date"];

/// Load historical rows from a CSV file
pub fn load_truck_history<P: AsRef<Path>>(path: P) -> Result<Vec<TruckRecord>, CsvLoaderError> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    // Strips a leading BOM if present
    let (decoded, had_errors) = UTF_8.decode_with_bom_removal(&bytes);
    if had_errors {
        warn!(path = %path.display(), "dataset contains invalid UTF-8; replaced undecodable bytes");
    }

    let records = load_truck_history_from_str(&decoded)?;
    info!(path = %path.display(), rows = records.len(), "loaded truck history");
    Ok(records)
}

/// Parse historical rows from CSV text with a header row
pub fn load_truck_history_from_str(content: &str) -> Result<Vec<TruckRecord>, CsvLoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect();
    let columns = map_columns(&headers)?;

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = result?;
        let row_num = row_idx + 2; // header is row 1

        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        records.push(parse_row(&row, &columns, row_num)?);
    }

    Ok(records)
}

/// Index of every header that names a record field
fn map_columns(headers: &[String]) -> Result<Vec<(usize, String)>, CsvLoaderError> {
    if !headers.iter().any(|h| PLATE_COLUMNS.contains(&h.as_str())) {
        return Err(CsvLoaderError::MissingColumn(PLATE_COLUMNS[0].to_string()));
    }

    let mut probe = TruckRecord::default();
    let mut columns = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        match probe.set_value(name, "") {
            Ok(()) => columns.push((idx, name.clone())),
            Err(_) => debug!(column = %name, "ignoring unknown dataset column"),
        }
    }
    Ok(columns)
}

fn parse_row(
    row: &csv::StringRecord,
    columns: &[(usize, String)],
    row_num: usize,
) -> Result<TruckRecord, CsvLoaderError> {
    let mut record = TruckRecord::default();
    for (idx, name) in columns {
        let cell = row.get(*idx).unwrap_or("");
        let cell = if is_missing(cell) { "" } else { cell };
        if record.set_value(name, cell).is_err() {
            let column = name.clone();
            let value = cell.to_string();
            return Err(if DATE_COLUMNS.contains(&name.as_str()) {
                CsvLoaderError::InvalidDate {
                    row: row_num,
                    column,
                    value,
                }
            } else {
                CsvLoaderError::InvalidNumber {
                    row: row_num,
                    column,
                    value,
                }
            });
        }
    }
    Ok(record)
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty()
        || cell.eq_ignore_ascii_case("nan")
        || cell.eq_ignore_ascii_case("na")
        || cell.eq_ignore_ascii_case("null")
}
