//! Image transforms in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Format gate** | static extension table ∩ codecs compiled in for read *and* write |
//! | **Identify** | header read with the gated codec |
//! | **Crop** | windowed `read_rect` (BMP) or full decode + `crop_imm` |
//! | **Thumbnail** | `resize_exact` onto a light-gray RGB canvas |
//!
//! The module is split into:
//! - **Formats**: The format gate ([`validate_format`])
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining validation, calculations and backend

pub mod backend;
mod calculations;
pub mod formats;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_canvas_dimensions, calculate_fit_dimensions};
pub use formats::{FormatError, supported_extensions, supported_formats, validate_format};
pub use operations::{
    CropConfig, ThumbnailConfig, TransformError, crop_to_path, crop_to_writer, get_dimensions,
    thumbnail_to_path, thumbnail_to_writer,
};
pub use params::{
    CropParams, DEFAULT_BACKGROUND, DEFAULT_CUT_PREFIX, DEFAULT_THUMB_PREFIX, Filter, Region,
    ThumbnailParams, ThumbnailSpec,
};
pub use rust_backend::RustBackend;
