//! Descriptor writer: one `set.nfo` per record under `<root>/<sanitized name>/`.
//!
//! Per record: sanitize -> folder -> overwrite decision -> serialize -> atomic write.
//! A failure at any stage is logged and recorded; the batch moves on.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::atomic::atomic_write;
use super::helpers::io_error_with_help;
use crate::cancel::CancelToken;
use crate::descriptor::{self, DescriptorName};
use crate::errors::ExportSetError;
use crate::sanitize::{SanitizePolicy, SanitizedSegment, TargetPlatform, sanitize};
use crate::source::Record;

/// Writer settings, resolved once before the batch starts.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Replace descriptors that already exist.
    pub overwrite: bool,
    /// Log what would happen without touching the filesystem.
    pub dry_run: bool,
    pub descriptor_name: DescriptorName,
    pub policy: SanitizePolicy,
}

/// Stage at which a record failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sanitize,
    Directory,
    Serialize,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Sanitize => "sanitize",
            Stage::Directory => "directory",
            Stage::Serialize => "serialize",
            Stage::Write => "write",
        })
    }
}

#[derive(Debug)]
pub enum Outcome {
    Written(PathBuf),
    /// Descriptor already present and overwrite is off.
    Skipped(PathBuf),
    Failed { stage: Stage, error: String },
}

#[derive(Debug)]
pub struct RecordReport {
    pub index: usize,
    pub name: String,
    pub outcome: Outcome,
}

/// Result of one export run.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub records: Vec<RecordReport>,
    /// The cancel token fired before every record was processed.
    pub interrupted: bool,
}

impl WriteReport {
    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Written(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    /// Completed = every record was visited (individual failures allowed).
    pub fn is_complete(&self) -> bool {
        !self.interrupted
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }
}

struct Failure {
    stage: Stage,
    error: ExportSetError,
}

impl Failure {
    fn at(stage: Stage) -> impl FnOnce(ExportSetError) -> Failure {
        move |error| Failure { stage, error }
    }
}

/// Write one descriptor per record under `root`.
///
/// Records are processed in order; `cancel` is checked before each one.
pub fn export_sets<I>(records: I, root: &Path, options: &ExportOptions, cancel: &CancelToken) -> WriteReport
where
    I: IntoIterator<Item = Record>,
{
    let mut report = WriteReport::default();
    // folder key -> index of the record that claimed it
    let mut claimed: HashMap<String, usize> = HashMap::new();

    for (index, record) in records.into_iter().enumerate() {
        if cancel.is_cancelled() {
            warn!(index, "Export interrupted; remaining sets not processed");
            report.interrupted = true;
            break;
        }

        let outcome = match export_one(&record, index, root, options, &mut claimed) {
            Ok(outcome) => outcome,
            Err(Failure { stage, error }) => {
                error!(
                    index,
                    set = %record.name,
                    %stage,
                    code = error.code(),
                    error = %error,
                    "Failed to export set"
                );
                Outcome::Failed {
                    stage,
                    error: error.to_string(),
                }
            }
        };
        report.records.push(RecordReport {
            index,
            name: record.name,
            outcome,
        });
    }

    info!(
        written = report.written(),
        skipped = report.skipped(),
        failed = report.failed(),
        interrupted = report.interrupted,
        "Export finished"
    );
    report
}

// Windows folder names are case-insensitive: `Alien` and `ALIEN` are one folder.
fn claim_key(segment: &SanitizedSegment, policy: &SanitizePolicy) -> String {
    match policy.platform() {
        TargetPlatform::Windows => segment.as_str().to_lowercase(),
        TargetPlatform::Unix => segment.as_str().to_string(),
    }
}

fn export_one(
    record: &Record,
    index: usize,
    root: &Path,
    options: &ExportOptions,
    claimed: &mut HashMap<String, usize>,
) -> Result<Outcome, Failure> {
    // Pending -> Sanitized
    let segment = sanitize(&record.name, &options.policy).map_err(Failure::at(Stage::Sanitize))?;
    if segment.as_str() != record.name {
        debug!(index, set = %record.name, folder = %segment, "Sanitized set name");
    }
    let key = claim_key(&segment, &options.policy);
    if let Some(first) = claimed.get(&key) {
        debug!(index, first, folder = %segment, "Folder already claimed in this run");
        return Err(Failure {
            stage: Stage::Sanitize,
            error: ExportSetError::DuplicateTarget {
                segment: segment.to_string(),
            },
        });
    }
    claimed.insert(key, index);

    // Sanitized -> DirectoryReady
    let dir = root.join(&segment);
    if options.dry_run {
        if !dir.is_dir() {
            info!(index, dir = %dir.display(), "Dry-run: would create set folder");
        }
    } else {
        fs::create_dir_all(&dir)
            .map_err(io_error_with_help("create set folder", &dir))
            .map_err(Failure::at(Stage::Directory))?;
    }

    // DirectoryReady -> Skipped | Written
    let file = dir.join(options.descriptor_name.file_name());
    if !options.overwrite && fs::symlink_metadata(&file).is_ok() {
        check_existing(&file);
        debug!(index, file = %file.display(), "Descriptor exists; leaving it untouched");
        return Ok(Outcome::Skipped(file));
    }

    let xml = descriptor::to_xml(record).map_err(|e| Failure {
        stage: Stage::Serialize,
        error: ExportSetError::PathWrite {
            path: file.clone(),
            context: format!("serialize descriptor: {e:#}"),
        },
    })?;

    if options.dry_run {
        info!(index, file = %file.display(), bytes = xml.len(), "Dry-run: would write descriptor");
        return Ok(Outcome::Written(file));
    }

    atomic_write(&file, &xml).map_err(Failure::at(Stage::Write))?;
    info!(index, set = %record.name, file = %file.display(), "Wrote descriptor");
    Ok(Outcome::Written(file))
}

// Flag hand-edited files that no longer parse; never modify them.
fn check_existing(file: &Path) {
    match fs::read_to_string(file) {
        Ok(text) => {
            if let Err(e) = descriptor::parse(&text) {
                warn!(file = %file.display(), error = %e, "Existing descriptor is not valid XML; left untouched");
            }
        }
        Err(e) => debug!(file = %file.display(), error = %e, "Could not read existing descriptor"),
    }
}
