//! Filesystem side of the export: atomic writes and the descriptor writer.

mod atomic;
mod export;
mod helpers;

pub use atomic::atomic_write;
pub use export::{ExportOptions, Outcome, RecordReport, Stage, WriteReport, export_sets};
pub use helpers::io_error_with_help;
