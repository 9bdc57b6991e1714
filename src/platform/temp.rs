//! Temporary sibling names for atomic writes.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of every temp file we create; never a valid set descriptor name.
pub(crate) const TEMP_PREFIX: &str = ".export_set.tmp.";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique hidden sibling of `target`.
/// Pattern: .export_set.tmp.<pid>.<nanos>.<seq>
pub(crate) fn tmp_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = format!("{TEMP_PREFIX}{pid}.{nanos}.{seq}");
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}
