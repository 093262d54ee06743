//! High-level image operations.
//!
//! Every operation runs the same single pass:
//!
//! ```text
//! validate (source exists, format gate) → decode → transform → encode → write
//! ```
//!
//! Any stage failing aborts the call. Nothing is written to a sink or created
//! on disk until the backend has returned the complete encoded image, so a
//! failed call never leaves a partial output file behind.
//!
//! Failures are logged where they are detected (`warn` for missing
//! paths, `error` for everything else) and also returned, so callers can
//! either ignore them or escalate.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_canvas_dimensions;
use super::formats::{FormatError, validate_format};
use super::params::{
    CropParams, DEFAULT_BACKGROUND, DEFAULT_CUT_PREFIX, Filter, Region, ThumbnailParams,
    ThumbnailSpec,
};
use crate::naming::{crop_file_name, now_millis, output_dir_for, thumbnail_file_name};
use image::ImageFormat;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Source image does not exist: {0}")]
    MissingSource(PathBuf),
    #[error("Destination does not exist: {0}")]
    MissingDestination(PathBuf),
    #[error(transparent)]
    UnsupportedFormat(#[from] FormatError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Rendering settings for thumbnails.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailConfig {
    pub filter: Filter,
    pub background: [u8; 3],
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// Settings for derived crop destinations.
#[derive(Debug, Clone, PartialEq)]
pub struct CropConfig {
    pub prefix: String,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CUT_PREFIX.to_string(),
        }
    }
}

fn log_failure(err: &TransformError) {
    match err {
        TransformError::MissingSource(_) | TransformError::MissingDestination(_) => {
            log::warn!("{err}")
        }
        _ => log::error!("{err}"),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Check the source exists and passes the format gate.
fn validate_source(source: &Path) -> Result<ImageFormat> {
    if !source.exists() {
        return Err(TransformError::MissingSource(source.to_path_buf()));
    }
    Ok(validate_format(&file_name_of(source))?)
}

/// Get image dimensions using the backend.
///
/// The path goes through the same existence and format checks as the
/// transforms, and the header is read with the gated codec.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let format = validate_source(path)?;
    let dims = backend.identify(path, format)?;
    Ok((dims.width, dims.height))
}

/// Write the encoded bytes to a file, creating or truncating it.
fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}

// ============================================================================
// Crop
// ============================================================================

fn encode_crop(backend: &impl ImageBackend, source: &Path, region: Region) -> Result<Vec<u8>> {
    let format = validate_source(source)?;
    let bytes = backend.crop(&CropParams {
        source: source.to_path_buf(),
        format,
        region,
    })?;
    Ok(bytes)
}

/// Crop `region` out of `source` and write it to `sink` in the source format.
///
/// The sink is flushed but stays open; the caller owns it.
pub fn crop_to_writer<W: Write + ?Sized>(
    backend: &impl ImageBackend,
    source: &Path,
    region: Region,
    sink: &mut W,
) -> Result<()> {
    encode_crop(backend, source, region)
        .and_then(|bytes| {
            sink.write_all(&bytes)?;
            sink.flush()?;
            Ok(())
        })
        .inspect_err(log_failure)
}

/// Crop `region` out of `source` into a file derived from `destination`.
///
/// `destination` must exist: a directory receives the file directly, a file
/// means "next to it". The file is named `<prefix><millis>_<source name>`.
/// Returns the path written.
pub fn crop_to_path(
    backend: &impl ImageBackend,
    source: &Path,
    region: Region,
    destination: &Path,
    config: &CropConfig,
) -> Result<PathBuf> {
    let run = || -> Result<PathBuf> {
        let dir = output_dir_for(destination)
            .ok_or_else(|| TransformError::MissingDestination(destination.to_path_buf()))?;
        let bytes = encode_crop(backend, source, region)?;
        let output = dir.join(crop_file_name(
            &config.prefix,
            now_millis(),
            &file_name_of(source),
        ));
        write_file(&output, &bytes)?;
        log::info!("Cropped {} → {}", source.display(), output.display());
        Ok(output)
    };
    run().inspect_err(log_failure)
}

// ============================================================================
// Thumbnail
// ============================================================================

/// Plan a thumbnail operation without executing it.
///
/// Resolves the canvas size from the natural source size and the request.
pub fn plan_thumbnail(
    source: &Path,
    format: ImageFormat,
    natural: Dimensions,
    spec: &ThumbnailSpec,
    config: &ThumbnailConfig,
) -> ThumbnailParams {
    log::debug!(
        "Thumbnail target size {}x{} (force: {})",
        spec.width,
        spec.height,
        spec.force
    );
    let (width, height) = calculate_canvas_dimensions(
        (natural.width, natural.height),
        (spec.width, spec.height),
        spec.force,
    );
    if (width, height) != (spec.width, spec.height) {
        log::debug!("Adjusted to source aspect ratio: {width}x{height}");
    }

    ThumbnailParams {
        source: source.to_path_buf(),
        format,
        width,
        height,
        filter: config.filter,
        background: config.background,
    }
}

fn encode_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    spec: &ThumbnailSpec,
    config: &ThumbnailConfig,
) -> Result<(Vec<u8>, Dimensions)> {
    let format = validate_source(source)?;
    let natural = backend.identify(source, format)?;
    let params = plan_thumbnail(source, format, natural, spec, config);
    let bytes = backend.thumbnail(&params)?;
    Ok((
        bytes,
        Dimensions {
            width: params.width,
            height: params.height,
        },
    ))
}

/// Create a thumbnail of `source` and write it to `sink` in the source format.
///
/// Takes ownership of the sink: it is flushed and closed on success.
/// Returns the canvas dimensions.
pub fn thumbnail_to_writer<W: Write>(
    backend: &impl ImageBackend,
    source: &Path,
    spec: &ThumbnailSpec,
    config: &ThumbnailConfig,
    mut sink: W,
) -> Result<Dimensions> {
    encode_thumbnail(backend, source, spec, config)
        .and_then(|(bytes, dims)| {
            sink.write_all(&bytes)?;
            sink.flush()?;
            drop(sink);
            Ok(dims)
        })
        .inspect_err(log_failure)
}

/// Create a thumbnail next to `source`, named `<spec.prefix><source name>`.
///
/// When `source` is a directory the file goes inside it. Returns the path
/// written.
pub fn thumbnail_to_path(
    backend: &impl ImageBackend,
    source: &Path,
    spec: &ThumbnailSpec,
    config: &ThumbnailConfig,
) -> Result<PathBuf> {
    let run = || -> Result<PathBuf> {
        if !source.exists() {
            return Err(TransformError::MissingSource(source.to_path_buf()));
        }
        let dir = output_dir_for(source)
            .ok_or_else(|| TransformError::MissingDestination(source.to_path_buf()))?;
        let (bytes, dims) = encode_thumbnail(backend, source, spec, config)?;
        let output = dir.join(thumbnail_file_name(&spec.prefix, &file_name_of(source)));
        write_file(&output, &bytes)?;
        log::info!(
            "Thumbnail {}x{} {} → {}",
            dims.width,
            dims.height,
            source.display(),
            output.display()
        );
        Ok(output)
    };
    run().inspect_err(log_failure)
}
