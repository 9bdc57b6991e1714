//! Set name -> filesystem-safe folder name.
//!
//! Sanitization is literal and character-by-character: the input is never
//! interpreted as a multi-segment path, so `a/../b` becomes `a_.._b` rather
//! than being resolved.
//!
//! Rules:
//! - `/` and `\` are replaced on every platform.
//! - Control characters (including NUL) are replaced.
//! - Windows rules additionally replace `<>:"|?*`, strip trailing dots/spaces
//!   and suffix reserved device names (`CON` -> `CON_`).
//! - Results that would be empty, `.` or `..` become a placeholder made of the
//!   replacement character.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::ExportSetError;

/// Longest folder name most filesystems accept (bytes).
pub const MAX_SEGMENT_BYTES: usize = 255;

const WINDOWS_INVALID: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

/// Which filesystem rules a folder name must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPlatform {
    Unix,
    Windows,
}

impl TargetPlatform {
    /// Rules of the platform this binary runs on.
    pub fn host() -> Self {
        if cfg!(windows) {
            TargetPlatform::Windows
        } else {
            TargetPlatform::Unix
        }
    }
}

impl Default for TargetPlatform {
    fn default() -> Self {
        Self::host()
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetPlatform::Unix => "unix",
            TargetPlatform::Windows => "windows",
        })
    }
}

impl FromStr for TargetPlatform {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unix" | "linux" | "macos" | "posix" => Ok(TargetPlatform::Unix),
            "windows" | "win" | "smb" => Ok(TargetPlatform::Windows),
            _ => Err(format!("invalid target platform: '{s}'")),
        }
    }
}

/// Parameters of the sanitizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizePolicy {
    platform: TargetPlatform,
    replacement: char,
    max_bytes: usize,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self {
            platform: TargetPlatform::host(),
            replacement: '_',
            max_bytes: MAX_SEGMENT_BYTES,
        }
    }
}

impl SanitizePolicy {
    /// Build a policy; the replacement character must itself survive sanitization.
    pub fn new(platform: TargetPlatform, replacement: char) -> Result<Self, String> {
        if needs_replacement(replacement, platform) || replacement == '.' || replacement == ' ' {
            return Err(format!(
                "replacement character {replacement:?} is not valid in {platform} folder names"
            ));
        }
        Ok(Self {
            platform,
            replacement,
            max_bytes: MAX_SEGMENT_BYTES,
        })
    }

    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }

    pub fn replacement(&self) -> char {
        self.replacement
    }
}

/// A single folder name that is safe to join onto the export root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedSegment(String);

impl SanitizedSegment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for SanitizedSegment {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

#[inline]
fn needs_replacement(c: char, platform: TargetPlatform) -> bool {
    if c == '/' || c == '\\' || c.is_control() {
        return true;
    }
    platform == TargetPlatform::Windows && WINDOWS_INVALID.contains(&c)
}

fn is_windows_reserved(base: &str) -> bool {
    let upper = base.to_ascii_uppercase();
    match upper.as_str() {
        "CON" | "PRN" | "AUX" | "NUL" => true,
        _ => {
            let bytes = upper.as_bytes();
            bytes.len() == 4
                && (upper.starts_with("COM") || upper.starts_with("LPT"))
                && (b'1'..=b'9').contains(&bytes[3])
        }
    }
}

fn truncate_to_bytes(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}

fn strip_windows_trailing(s: &mut String) {
    let kept = s.trim_end_matches(['.', ' ']).len();
    s.truncate(kept);
}

/// Turn a set name into a folder name according to `policy`.
///
/// Fails only when the name is empty or whitespace.
pub fn sanitize(name: &str, policy: &SanitizePolicy) -> Result<SanitizedSegment, ExportSetError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ExportSetError::EmptyName);
    }

    let mut out: String = trimmed
        .chars()
        .map(|c| {
            if needs_replacement(c, policy.platform) {
                policy.replacement
            } else {
                c
            }
        })
        .collect();

    let windows = policy.platform == TargetPlatform::Windows;
    if windows {
        strip_windows_trailing(&mut out);
    }
    truncate_to_bytes(&mut out, policy.max_bytes);
    if windows {
        strip_windows_trailing(&mut out);
    }

    if out.is_empty() || out == "." || out == ".." {
        out = std::iter::repeat_n(policy.replacement, trimmed.chars().count()).collect();
        truncate_to_bytes(&mut out, policy.max_bytes);
    }

    if windows {
        let base_len = out.find('.').unwrap_or(out.len());
        if is_windows_reserved(&out[..base_len]) {
            out.insert(base_len, policy.replacement);
            truncate_to_bytes(&mut out, policy.max_bytes);
            // the cut may land just after a dot or space
            strip_windows_trailing(&mut out);
        }
    }

    Ok(SanitizedSegment(out))
}
