//! Atomic file replacement.
//! - Writes to a hidden temp sibling, fsyncs, then renames over the target.
//! - Readers never observe a half-written descriptor.
//! - On Unix, best-effort fsync of the parent directory after the rename.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::helpers::io_error_with_help;
use crate::errors::ExportSetError;
use crate::platform::sync_dir;
use crate::platform::temp::tmp_sibling_name;

/// Replace `path` with `contents`. The parent directory must exist.
/// On failure the temp file is removed and `path` is left as it was.
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<(), ExportSetError> {
    let tmp = tmp_sibling_name(path);

    let written = (|| {
        let mut f = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp)
            .map_err(io_error_with_help("create temp file", &tmp))?;
        f.write_all(contents)
            .map_err(io_error_with_help("write temp file", &tmp))?;
        f.sync_all().map_err(io_error_with_help("fsync temp file", &tmp))?;
        drop(f);
        fs::rename(&tmp, path).map_err(io_error_with_help("replace", path))
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    if let Some(parent) = path.parent() {
        let _ = sync_dir(parent);
    }
    Ok(())
}
