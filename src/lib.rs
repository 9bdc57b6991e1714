//! Core library for `export_set`.
//!
//! Turns movie set records (from a `|`-delimited file or a library query
//! result) into `<root>/<set name>/set.nfo` descriptors.
//!
//! Pipeline: [`source::load_records`] -> [`fs_ops::export_sets`], which runs
//! [`sanitize::sanitize`] and [`descriptor::to_xml`] per record.

pub mod cancel;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod sanitize;
pub mod source;

pub use cancel::CancelToken;
pub use config::{Config, LogLevel, TargetRoot, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use descriptor::DescriptorName;
pub use errors::ExportSetError;
pub use fs_ops::{ExportOptions, Outcome, WriteReport, export_sets};
pub use sanitize::{SanitizePolicy, SanitizedSegment, TargetPlatform, sanitize};
pub use source::{Record, RecordSource, load_records};
