//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a commented template if the default file is missing (unless EXPORT_SET_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; root validation happens elsewhere.
//! - Unknown XML fields are rejected so typos surface early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::paths::{CONFIG_ENV, default_config_path, default_log_path, path_has_symlink_ancestor};
use crate::config::types::{Config, LogLevel};
use crate::fs_ops::atomic_write;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    sets_folder: Option<String>,
    csv_file: Option<String>,
    overwrite: Option<String>,
    descriptor_name: Option<String>,
    target_platform: Option<String>,
    replacement_char: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Outcome of looking for the config file.
#[derive(Debug)]
pub enum LoadResult {
    Loaded(PathBuf, Config),
    /// No file, and no template written (explicit EXPORT_SET_CONFIG path, or creation failed); defaults apply.
    NotFound(PathBuf),
    /// Default path was missing; a template was written there and defaults apply.
    CreatedTemplate(PathBuf),
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(field: &str, s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => bail!("{field}: expected true or false, got '{s}'"),
    }
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config {
        sets_folder: non_empty(parsed.sets_folder.as_deref()).map(str::to_string),
        csv_file: non_empty(parsed.csv_file.as_deref()).map(PathBuf::from),
        log_file: non_empty(parsed.log_file.as_deref()).map(PathBuf::from),
        ..Default::default()
    };

    if let Some(s) = non_empty(parsed.overwrite.as_deref()) {
        cfg.overwrite = Some(parse_bool("overwrite", s)?);
    }
    if let Some(s) = non_empty(parsed.descriptor_name.as_deref()) {
        cfg.descriptor_name = s.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = non_empty(parsed.target_platform.as_deref()) {
        cfg.target_platform = s.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = non_empty(parsed.replacement_char.as_deref()) {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => cfg.replacement_char = c,
            _ => bail!("replacement_char: expected a single character, got '{s}'"),
        }
    }
    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }

    // Reject a bad replacement/platform combination here rather than mid-run.
    cfg.sanitize_policy()?;
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Load the config file, writing a template at the default location when none exists.
pub fn load_or_init() -> Result<LoadResult> {
    let path = default_config_path()?;
    if path.exists() {
        let cfg = load_config_from_xml_path(&path)?;
        debug!(path = %path.display(), "Loaded config");
        return Ok(LoadResult::Loaded(path, cfg));
    }
    if env::var_os(CONFIG_ENV).is_some() {
        return Ok(LoadResult::NotFound(path));
    }
    match create_template_config(&path) {
        Ok(()) => Ok(LoadResult::CreatedTemplate(path)),
        Err(e) => {
            warn!(path = %path.display(), error = %format!("{e:#}"), "Could not create template config");
            Ok(LoadResult::NotFound(path))
        }
    }
}

/// Write the commented template config (refuses symlinked ancestors).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/export_set.log".into());

    let content = format!(
        "<!--\n  export_set configuration (XML)\n\n  sets_folder       -> movie set information folder (local path; smb:// and nfs:// are not supported)\n  csv_file          -> optional '|'-delimited source used when no source flag is given\n  overwrite         -> true | false (empty = ask on each run)\n  descriptor_name   -> nfo (set.nfo) | xml (legacy set.xml)\n  target_platform   -> windows | unix (folder naming rules; windows is safest for shared libraries)\n  replacement_char  -> character used in place of invalid ones\n  log_level         -> quiet | normal | info | debug\n  log_file          -> optional log file, e.g. {suggested_log}\n\n  CLI flags override these values.\n-->\n<config>\n  <sets_folder></sets_folder>\n  <csv_file></csv_file>\n  <overwrite></overwrite>\n  <descriptor_name>nfo</descriptor_name>\n  <target_platform>windows</target_platform>\n  <replacement_char>_</replacement_char>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n</config>\n"
    );

    atomic_write(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}
