//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "EXPORT_SET_CONFIG";

/// Config file location: `$EXPORT_SET_CONFIG` if set, else the OS config dir.
/// A relative `$EXPORT_SET_CONFIG` is resolved against the current directory.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let p = PathBuf::from(p);
        return Ok(if p.is_absolute() {
            p
        } else {
            env::current_dir()?.join(p)
        });
    }
    if let Some(mut base) = config_dir() {
        base.push("export_set");
        base.push("config.xml");
        return Ok(base);
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("export_set")
                .join("config.xml")
        })
        .ok_or_else(|| anyhow!("cannot determine a config directory (no config dir or HOME)"))
}

/// Suggested log file location (data dir). Does not create anything.
pub fn default_log_path() -> Result<PathBuf> {
    data_dir()
        .map(|d| d.join("export_set").join("export_set.log"))
        .ok_or_else(|| anyhow!("cannot determine a data directory for logs"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn env_override_wins() {
        let td = tempdir().unwrap();
        let cfg = td.path().join("custom.xml");
        unsafe { env::set_var(CONFIG_ENV, &cfg) };
        let got = default_config_path().unwrap();
        unsafe { env::remove_var(CONFIG_ENV) };
        assert_eq!(got, cfg);
    }

    #[test]
    #[serial]
    fn default_path_ends_with_app_dir() {
        unsafe { env::remove_var(CONFIG_ENV) };
        if let Ok(p) = default_config_path() {
            assert!(p.ends_with("export_set/config.xml"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn detects_symlinked_ancestor() {
        let td = tempdir().unwrap();
        let base = fs::canonicalize(td.path()).unwrap();
        let real = base.join("real");
        fs::create_dir(&real).unwrap();
        let link = base.join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert!(path_has_symlink_ancestor(&link.join("x.log")).unwrap());
        assert!(!path_has_symlink_ancestor(&real.join("x.log")).unwrap());
    }
}
