//! Typed error definitions for export_set.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportSetError {
    #[error("No movie set folder configured (tried: {})", tried.join(", "))]
    ConfigurationMissing { tried: Vec<String> },

    #[error("Movie set folder setting is invalid: {}", details.join("; "))]
    ConfigurationMalformed { details: Vec<String> },

    #[error("Network share roots are not supported: {root}")]
    UnsupportedRemoteRoot { root: String },

    #[error("No record source configured; pass --csv or --library")]
    SourceUnavailable,

    #[error("Malformed record source {origin}: {detail}")]
    MalformedSource { origin: String, detail: String },

    #[error("Set name is empty")]
    EmptyName,

    #[error("Another set in this run already maps to folder '{segment}'")]
    DuplicateTarget { segment: String },

    #[error("Cannot write {path}: {context}")]
    PathWrite { path: PathBuf, context: String },

    #[error("Export interrupted by user")]
    Interrupted,
}

impl ExportSetError {
    /// Stable numeric code, emitted as a structured log field.
    pub fn code(&self) -> u16 {
        match self {
            ExportSetError::ConfigurationMissing { .. } => 10,
            ExportSetError::ConfigurationMalformed { .. } => 11,
            ExportSetError::UnsupportedRemoteRoot { .. } => 12,
            ExportSetError::SourceUnavailable => 20,
            ExportSetError::MalformedSource { .. } => 21,
            ExportSetError::EmptyName => 30,
            ExportSetError::DuplicateTarget { .. } => 31,
            ExportSetError::PathWrite { .. } => 40,
            ExportSetError::Interrupted => 130,
        }
    }
}
