//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - CLI flags override config file values.
//! - --debug is a shorthand for --log-level debug.
//! - Without --overwrite/--no-overwrite (and no config value) the user is asked.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::descriptor::DescriptorName;
use crate::sanitize::TargetPlatform;
use crate::source::RecordSource;

/// Export movie set metadata into per-set set.nfo folders.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Export movie set metadata into per-set set.nfo folders"
)]
pub struct Args {
    /// Movie set information folder (overrides EXPORT_SET_ROOT and the config file).
    #[arg(long, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub sets_folder: Option<String>,

    /// Read sets from a '|'-delimited file (`-` for stdin).
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath, conflicts_with = "library")]
    pub csv: Option<PathBuf>,

    /// Read sets from a JSON library query result (`-` for stdin).
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub library: Option<PathBuf>,

    /// Replace existing descriptors without asking.
    #[arg(long, conflicts_with = "no_overwrite")]
    pub overwrite: bool,

    /// Never replace existing descriptors (no prompt).
    #[arg(long)]
    pub no_overwrite: bool,

    /// Descriptor file name: nfo (set.nfo) or xml (legacy set.xml).
    #[arg(long, value_name = "NAME")]
    pub descriptor_name: Option<DescriptorName>,

    /// Folder naming rules: windows or unix.
    #[arg(long, value_name = "PLATFORM")]
    pub target_platform: Option<TargetPlatform>,

    /// Character used in place of invalid folder-name characters.
    #[arg(long, value_name = "CHAR")]
    pub replacement_char: Option<char>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Print where export_set will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by export_set and exit")]
    pub print_config: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be written, but do not create folders or files"
    )]
    pub dry_run: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Explicit overwrite choice, if any flag was given.
    pub fn overwrite_choice(&self) -> Option<bool> {
        match (self.overwrite, self.no_overwrite) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Record source: CLI flags first, then the config file's csv_file.
    pub fn record_source(&self, cfg: &Config) -> Option<RecordSource> {
        if let Some(p) = &self.csv {
            return Some(RecordSource::Delimited(p.clone()));
        }
        if let Some(p) = &self.library {
            return Some(RecordSource::Library(p.clone()));
        }
        cfg.csv_file.clone().map(RecordSource::Delimited)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(choice) = self.overwrite_choice() {
            cfg.overwrite = Some(choice);
        }
        if let Some(name) = self.descriptor_name {
            cfg.descriptor_name = name;
        }
        if let Some(platform) = self.target_platform {
            cfg.target_platform = platform;
        }
        if let Some(c) = self.replacement_char {
            cfg.replacement_char = c;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
