//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which validates inputs and plans output sizes) and the
//! [`backend`](super::backend) (which does the pixel work). This separation
//! allows swapping backends (e.g. for testing with a mock) without changing
//! operation logic.
//!
//! ## Types
//!
//! - [`Region`] — Crop rectangle in source pixel coordinates.
//! - [`ThumbnailSpec`] — What the caller asked for: target size, force flag, filename prefix.
//! - [`Filter`] — Resampling filter used when rendering a thumbnail.
//! - [`CropParams`] / [`ThumbnailParams`] — Fully planned backend requests.

use image::ImageFormat;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default filename prefix for derived thumbnail paths.
pub const DEFAULT_THUMB_PREFIX: &str = "thumb_";
/// Default filename prefix for derived crop paths.
pub const DEFAULT_CUT_PREFIX: &str = "cut_";
/// Canvas fill for areas the source does not cover (light gray).
pub const DEFAULT_BACKGROUND: [u8; 3] = [192, 192, 192];

/// A rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A thumbnail request.
///
/// With `force` unset the requested size is adjusted to the source aspect
/// ratio before rendering; with it set the source is stretched to exactly
/// `width` x `height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailSpec {
    pub width: u32,
    pub height: u32,
    pub force: bool,
    /// Only used when the destination is derived from the source path.
    pub prefix: String,
}

impl ThumbnailSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            force: false,
            prefix: DEFAULT_THUMB_PREFIX.to_string(),
        }
    }

    pub fn forced(width: u32, height: u32) -> Self {
        Self {
            force: true,
            ..Self::new(width, height)
        }
    }
}

/// Resampling filter for thumbnail rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Parameters for a crop operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CropParams {
    pub source: PathBuf,
    pub format: ImageFormat,
    pub region: Region,
}

/// Parameters for a thumbnail operation (resize onto a filled canvas).
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub format: ImageFormat,
    /// Final canvas dimensions.
    pub width: u32,
    pub height: u32,
    pub filter: Filter,
    pub background: [u8; 3],
}
