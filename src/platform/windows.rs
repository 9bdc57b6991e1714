//! Windows implementations of platform helpers (best-effort, no ACL management).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Open log file for appending (no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Directory fsync is not supported via std on Windows; renames are durable enough.
pub fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
