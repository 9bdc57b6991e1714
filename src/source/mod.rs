//! Record sources: delimited text files and library query results.
//!
//! Both inputs are normalized into the same positional layout
//! `[reserved, name, overview, original_name]` before becoming `Record`s.

mod delimited;
mod library;

pub use delimited::{FIELD_DELIMITER, read_delimited};
pub use library::read_library;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::ExportSetError;

/// One movie set as read from a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub overview: String,
    pub original_name: String,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        overview: impl Into<String>,
        original_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            overview: overview.into(),
            original_name: original_name.into(),
        }
    }

    /// Build from a positional row. Position 0 is reserved; positions 1..=3
    /// are name, overview and original name. Missing trailing fields become
    /// empty strings.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let field = |i: usize| -> String {
            match fields.get(i) {
                Some(v) => v.as_ref().to_string(),
                None => {
                    debug!(position = i, "record field missing; using empty value");
                    String::new()
                }
            }
        };
        if fields.len() > 4 {
            debug!(extra = fields.len() - 4, "ignoring fields beyond original title");
        }
        Self {
            name: field(1),
            overview: field(2),
            original_name: field(3),
        }
    }
}

/// Where records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// `|`-delimited text file (`-` = stdin).
    Delimited(PathBuf),
    /// JSON library query result (`-` = stdin).
    Library(PathBuf),
}

impl RecordSource {
    pub fn path(&self) -> &Path {
        match self {
            RecordSource::Delimited(p) | RecordSource::Library(p) => p,
        }
    }
}

fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("open record source '{}'", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Load every record from the configured source.
///
/// Fails with `SourceUnavailable` when nothing is configured and with
/// `MalformedSource` when the input is structurally broken.
pub fn load_records(source: Option<&RecordSource>) -> Result<Vec<Record>> {
    let source = source.ok_or(ExportSetError::SourceUnavailable)?;
    let reader = open_input(source.path())?;
    let origin = source.path().display().to_string();
    let records = match source {
        RecordSource::Delimited(_) => read_delimited(reader, &origin)?,
        RecordSource::Library(_) => read_library(reader, &origin)?,
    };
    info!(source = %origin, count = records.len(), "Loaded movie set records");
    Ok(records)
}
