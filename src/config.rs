//! Tool configuration module.
//!
//! Handles loading, validating, and merging an optional `config.toml`. Stock
//! defaults are overridden by whatever the user file sets; command-line flags
//! override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [thumbnail]
//! prefix = "thumb_"             # Prefix for thumbnails written beside the source
//! force = false                 # true = exact size, false = keep aspect ratio
//! filter = "lanczos3"           # nearest | triangle | catmull-rom | gaussian | lanczos3
//! background = [192, 192, 192]  # Canvas fill (RGB)
//!
//! [crop]
//! prefix = "cut_"               # Prefix for crops written into a destination dir
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{
    CropConfig, DEFAULT_BACKGROUND, DEFAULT_CUT_PREFIX, DEFAULT_THUMB_PREFIX, Filter,
    ThumbnailConfig, ThumbnailSpec,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Thumbnail defaults and rendering.
    pub thumbnail: ThumbnailSection,
    /// Crop output naming.
    pub crop: CropSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailSection {
    pub prefix: String,
    pub force: bool,
    pub filter: Filter,
    pub background: [u8; 3],
}

impl Default for ThumbnailSection {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_THUMB_PREFIX.to_string(),
            force: false,
            filter: Filter::default(),
            background: DEFAULT_BACKGROUND,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropSection {
    pub prefix: String,
}

impl Default for CropSection {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CUT_PREFIX.to_string(),
        }
    }
}

fn validate_prefix(key: &str, prefix: &str) -> Result<(), ConfigError> {
    if prefix.is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    if prefix.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "{key} must not contain path separators"
        )));
    }
    Ok(())
}

impl ToolConfig {
    /// Validate config values are usable as file name prefixes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_prefix("thumbnail.prefix", &self.thumbnail.prefix)?;
        validate_prefix("crop.prefix", &self.crop.prefix)?;
        Ok(())
    }

    pub fn thumbnail_config(&self) -> ThumbnailConfig {
        ThumbnailConfig {
            filter: self.thumbnail.filter,
            background: self.thumbnail.background,
        }
    }

    /// Build a thumbnail request, letting command-line values win.
    ///
    /// `force` is `Some` only when `--force` or `--no-force` was given.
    pub fn thumbnail_spec(
        &self,
        width: u32,
        height: u32,
        force: Option<bool>,
        prefix: Option<String>,
    ) -> ThumbnailSpec {
        ThumbnailSpec {
            width,
            height,
            force: force.unwrap_or(self.thumbnail.force),
            prefix: prefix.unwrap_or_else(|| self.thumbnail.prefix.clone()),
        }
    }

    pub fn crop_config(&self) -> CropConfig {
        CropConfig {
            prefix: self.crop.prefix.clone(),
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ToolConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load config from a file, or stock defaults when `path` is `None`.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(path: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let overlay: toml::Value = toml::from_str(&content)?;
            merge_toml(base, overlay)
        }
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# thumbcut configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnail]
# Prefix for thumbnails written next to the source image.
prefix = "thumb_"

# true  = output exactly WIDTHxHEIGHT, stretching the image if needed
# false = adjust one edge to keep the source aspect ratio
force = false

# Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3
filter = "lanczos3"

# Canvas color (RGB) behind transparent source pixels.
background = [192, 192, 192]

# ---------------------------------------------------------------------------
# Crops
# ---------------------------------------------------------------------------
[crop]
# Crops written into a destination directory are named
# <prefix><milliseconds>_<source file name>.
prefix = "cut_"
"##
}
