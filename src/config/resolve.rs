//! Movie set folder resolution.
//!
//! Candidates are tried in order (CLI flag, environment, config file); the
//! first valid one wins. When none is valid, every candidate's verdict is
//! folded into a single diagnostic.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::ExportSetError;

/// Environment variable naming the movie set folder.
pub const ROOT_ENV: &str = "EXPORT_SET_ROOT";

/// Where descriptors are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRoot {
    Local(PathBuf),
    /// smb:// or nfs:// location; recognised but not writable.
    Remote {
        scheme: String,
        host: String,
        path: String,
    },
}

impl TargetRoot {
    /// Local directory, or `UnsupportedRemoteRoot` for network shares.
    pub fn require_local(&self) -> Result<&Path, ExportSetError> {
        match self {
            TargetRoot::Local(p) => Ok(p),
            remote => Err(ExportSetError::UnsupportedRemoteRoot {
                root: remote.to_string(),
            }),
        }
    }
}

impl fmt::Display for TargetRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRoot::Local(p) => write!(f, "{}", p.display()),
            TargetRoot::Remote { scheme, host, path } => write!(f, "{scheme}://{host}/{path}"),
        }
    }
}

/// Verdict on one candidate setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSetting {
    Valid(TargetRoot),
    Missing,
    Malformed(String),
}

/// One place a root may come from, in priority order.
#[derive(Debug, Clone)]
pub struct RootCandidate {
    pub origin: String,
    pub value: Option<String>,
}

impl RootCandidate {
    pub fn new(origin: impl Into<String>, value: Option<String>) -> Self {
        Self {
            origin: origin.into(),
            value,
        }
    }
}

/// Classify a raw setting value.
pub fn classify(raw: Option<&str>) -> RootSetting {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return RootSetting::Missing;
    };

    if let Some((scheme, rest)) = raw.split_once("://") {
        let scheme = scheme.to_ascii_lowercase();
        match scheme.as_str() {
            "smb" | "nfs" => {
                let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
                if host.is_empty() {
                    return RootSetting::Malformed(format!("'{raw}' has no host"));
                }
                return RootSetting::Valid(TargetRoot::Remote {
                    scheme,
                    host: host.to_string(),
                    path: path.trim_end_matches('/').to_string(),
                });
            }
            "file" => return classify_local(rest),
            _ => {
                return RootSetting::Malformed(format!("unsupported scheme '{scheme}' in '{raw}'"));
            }
        }
    }
    classify_local(raw)
}

fn classify_local(raw: &str) -> RootSetting {
    let path = PathBuf::from(raw);
    // A root like "/" or "C:\" has no folder name of its own.
    if path.file_name().is_none() {
        return RootSetting::Malformed(format!("'{raw}' does not name a folder"));
    }
    RootSetting::Valid(TargetRoot::Local(path))
}

/// Walk `candidates` in order; first valid wins.
pub fn resolve_root(candidates: &[RootCandidate]) -> Result<TargetRoot, ExportSetError> {
    let mut tried = Vec::new();
    let mut malformed = Vec::new();

    for candidate in candidates {
        match classify(candidate.value.as_deref()) {
            RootSetting::Valid(root) => {
                debug!(origin = %candidate.origin, root = %root, "Resolved movie set folder");
                return Ok(root);
            }
            RootSetting::Missing => tried.push(candidate.origin.clone()),
            RootSetting::Malformed(detail) => {
                malformed.push(format!("{}: {detail}", candidate.origin))
            }
        }
    }

    if malformed.is_empty() {
        Err(ExportSetError::ConfigurationMissing { tried })
    } else {
        Err(ExportSetError::ConfigurationMalformed { details: malformed })
    }
}
