//! I/O helper utilities.
//!
//! Enriches io::Error with the operation, the path and an actionable hint so
//! per-set failures in the log can be diagnosed without re-running.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create set folder", dir))?;

use std::io;
use std::path::Path;

use crate::errors::ExportSetError;

/// Platform-aware hint for an OS error code, if we know one.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        let hint = match code {
            libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions of the movie set folder",
            libc::ENOENT => "path not found; verify the movie set folder exists",
            libc::EEXIST => "already exists",
            libc::ENOTDIR => "a file is in the way where a set folder is expected",
            libc::EISDIR => "a folder is in the way where the descriptor file is expected",
            libc::ENOSPC => "insufficient space on device",
            libc::EDQUOT => "disk quota exceeded",
            libc::EROFS => "read-only filesystem; cannot write here",
            libc::ENAMETOOLONG => "filename or path too long; shorten the set name or the root path",
            libc::ELOOP => "too many symbolic link levels; possible symlink cycle",
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(windows)]
    {
        // Common Win32 errors
        let hint = match code {
            5 => "access denied; check permissions",         // ERROR_ACCESS_DENIED
            2 | 3 => "path not found; verify it exists",      // FILE/PATH NOT FOUND
            32 => "sharing violation; file is open in another program", // ERROR_SHARING_VIOLATION
            80 | 183 => "already exists",                     // ERROR_FILE_EXISTS / ALREADY_EXISTS
            112 => "insufficient disk space",                 // ERROR_DISK_FULL
            19 => "write protected / read-only media",        // ERROR_WRITE_PROTECT
            123 => "invalid characters in name",              // ERROR_INVALID_NAME
            206 => "filename or path too long (MAX_PATH exceeded)", // ERROR_FILENAME_EXCED_RANGE
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => os_hint(code),
        None => kind_hint(e.kind()),
    };
    if let Some(hint) = hint {
        msg.push_str(" (");
        msg.push_str(hint);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Returns a closure for `.map_err(...)` that turns io::Error into `PathWrite`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> ExportSetError + 'a {
    move |e: io::Error| ExportSetError::PathWrite {
        path: path.to_path_buf(),
        context: build_message(op, path, &e),
    }
}
