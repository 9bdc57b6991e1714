//! `|`-delimited rows: `reserved|name|overview|original title`.

use anyhow::Result;
use std::io::Read;
use tracing::{debug, warn};

use super::Record;
use crate::errors::ExportSetError;

pub const FIELD_DELIMITER: u8 = b'|';

/// Read every row; short rows are padded with empty fields.
/// Blank lines are skipped. A row that is not valid UTF-8 is reported and
/// skipped; an I/O error or any other reader failure is fatal.
pub fn read_delimited<R: Read>(reader: R, origin: &str) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let fields = match result {
            Ok(fields) => fields,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                warn!(row = row + 1, source = origin, error = %e, "Skipping row that is not valid UTF-8");
                continue;
            }
            Err(e) => {
                return Err(ExportSetError::MalformedSource {
                    origin: origin.to_string(),
                    detail: format!("row {}: {e}", row + 1),
                }
                .into());
            }
        };
        let fields: Vec<&str> = fields.iter().collect();
        debug!(row = row + 1, fields = fields.len(), "delimited row");
        records.push(Record::from_fields(&fields));
    }
    Ok(records)
}
