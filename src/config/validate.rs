//! Root folder validation.
//! Verifies the movie set folder is a writable directory, creating it when missing.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Make sure `root` is usable and return its canonical form.
///
/// - existing non-directory: error
/// - missing: created (skipped in dry-run)
/// - must accept a probe file (skipped in dry-run)
pub fn prepare_root(root: &Path, dry_run: bool) -> Result<PathBuf> {
    if root.exists() {
        if !root.is_dir() {
            error!("movie set folder exists but isn't a directory: {}", root.display());
            bail!("movie set folder exists but isn't a directory: {}", root.display());
        }
    } else if dry_run {
        info!("Dry-run: would create movie set folder {}", root.display());
        return Ok(root.to_path_buf());
    } else {
        fs::create_dir_all(root).with_context(|| {
            format!("Failed to create movie set folder '{}'", root.display())
        })?;
        info!("Created movie set folder: {}", root.display());
    }

    if !dry_run {
        is_writable_probe(root).with_context(|| {
            format!("Cannot write to movie set folder '{}'; check permissions", root.display())
        })?;
        debug!("movie set folder writable: {}", root.display());
    }

    Ok(dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()))
}

/// Quick writable probe: create and remove a small file in `dir`.
/// Uses create_new to avoid clobbering existing files.
fn is_writable_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".export_set_probe_{}.tmp", std::process::id()));
    fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)?;
    let _ = fs::remove_file(&probe);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_root() {
        let td = tempdir().unwrap();
        let root = td.path().join("Movie Sets").join("nested");
        let got = prepare_root(&root, false).unwrap();
        assert!(root.is_dir());
        assert!(got.ends_with("nested"));
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0, "probe must be removed");
    }

    #[test]
    fn dry_run_does_not_create() {
        let td = tempdir().unwrap();
        let root = td.path().join("later");
        let got = prepare_root(&root, true).unwrap();
        assert_eq!(got, root);
        assert!(!root.exists());
    }

    #[test]
    fn file_root_is_rejected() {
        let td = tempdir().unwrap();
        let root = td.path().join("not_a_dir");
        fs::write(&root, b"x").unwrap();
        let err = prepare_root(&root, false).unwrap_err();
        assert!(err.to_string().contains("isn't a directory"));
    }
}
