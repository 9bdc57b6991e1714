//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::descriptor::DescriptorName;
use crate::sanitize::{SanitizePolicy, TargetPlatform};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration, built once (XML file, then CLI overrides) and passed down.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw movie set folder setting from the config file (path or smb/nfs URL)
    pub sets_folder: Option<String>,
    /// Delimited source file named in the config file
    pub csv_file: Option<PathBuf>,
    /// Replace existing descriptors; None = ask
    pub overwrite: Option<bool>,
    /// set.nfo or legacy set.xml
    pub descriptor_name: DescriptorName,
    /// Folder naming rules
    pub target_platform: TargetPlatform,
    pub replacement_char: char,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, log actions but do not touch the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sets_folder: None,
            csv_file: None,
            overwrite: None,
            descriptor_name: DescriptorName::default(),
            target_platform: TargetPlatform::host(),
            replacement_char: '_',
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
        }
    }
}

impl Config {
    /// Sanitizer settings derived from this config.
    pub fn sanitize_policy(&self) -> anyhow::Result<SanitizePolicy> {
        SanitizePolicy::new(self.target_platform, self.replacement_char).map_err(anyhow::Error::msg)
    }
}
