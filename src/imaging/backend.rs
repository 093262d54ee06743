//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, crop, and thumbnail. Crop and thumbnail return the
//! encoded bytes rather than writing them, so the caller decides where they
//! go and nothing touches the destination until encoding has succeeded.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image` crate.

use super::params::{CropParams, ThumbnailParams};
use image::ImageFormat;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions, reading the header with the gated codec.
    fn identify(&self, path: &Path, format: ImageFormat) -> Result<Dimensions, BackendError>;

    /// Decode `params.region` of the source and encode it in `params.format`.
    fn crop(&self, params: &CropParams) -> Result<Vec<u8>, BackendError>;

    /// Render the source onto a `width` x `height` canvas and encode it.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<Vec<u8>, BackendError>;
}
