//! Output filename conventions for derived destinations.
//!
//! When a caller does not supply an output stream, the destination file name
//! is built from the source file name:
//!
//! - thumbnail: `<prefix><original>` → `thumb_Tulips.jpg`
//! - crop: `<prefix><timestamp-millis>_<original>` → `cut_1414463066000_Tulips.jpg`
//!
//! The original name keeps its extension, so the output always carries the
//! format it was encoded in.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// File name for a derived thumbnail.
pub fn thumbnail_file_name(prefix: &str, original: &str) -> String {
    format!("{prefix}{original}")
}

/// File name for a derived crop.
pub fn crop_file_name(prefix: &str, timestamp_millis: u128, original: &str) -> String {
    format!("{prefix}{timestamp_millis}_{original}")
}

/// Milliseconds since the Unix epoch, 0 if the clock is before it.
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Directory a derived output is written into.
///
/// An existing directory is used as is; an existing file means "next to this
/// file". Returns `None` when `target` does not exist.
pub fn output_dir_for(target: &Path) -> Option<PathBuf> {
    if target.is_dir() {
        return Some(target.to_path_buf());
    }
    if !target.exists() {
        return None;
    }
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Some(parent.to_path_buf()),
        _ => Some(PathBuf::from(".")),
    }
}
