//! Format gate: decides from a filename whether an image can be transformed.
//!
//! A format passes only if its codec is compiled in for **both** decoding and
//! encoding, because every operation writes its result back in the source
//! format. The candidate table below is static; the effective set is computed
//! once from `ImageFormat::reading_enabled()` / `writing_enabled()`, so it tracks
//! the `image` crate features this binary was built with.

use image::ImageFormat;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("'{0}' has no file extension")]
    MissingExtension(String),
    #[error("unsupported image format '{extension}', supported: {}", .supported.join(", "))]
    Unsupported {
        extension: String,
        supported: Vec<&'static str>,
    },
}

/// Extensions we know how to map onto an `image` codec.
///
/// Entries whose codec feature is disabled are dropped by [`SUPPORTED`].
const CANDIDATES: &[(&str, ImageFormat)] = &[
    ("bmp", ImageFormat::Bmp),
    ("gif", ImageFormat::Gif),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
    ("ico", ImageFormat::Ico),
    ("tga", ImageFormat::Tga),
    ("qoi", ImageFormat::Qoi),
    ("pbm", ImageFormat::Pnm),
    ("pgm", ImageFormat::Pnm),
    ("ppm", ImageFormat::Pnm),
];

static SUPPORTED: LazyLock<Vec<(&'static str, ImageFormat)>> = LazyLock::new(|| {
    CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled() && fmt.writing_enabled())
        .copied()
        .collect()
});

/// Extensions that pass the format gate, lower-case, in table order.
pub fn supported_extensions() -> Vec<&'static str> {
    SUPPORTED.iter().map(|(ext, _)| *ext).collect()
}

/// Supported extensions paired with the codec that handles them.
pub fn supported_formats() -> &'static [(&'static str, ImageFormat)] {
    &SUPPORTED
}

/// Validate a filename against the supported codecs.
///
/// The candidate token is everything after the last `.`; comparison is
/// case-insensitive. Returns the codec to decode and re-encode with.
pub fn validate_format(filename: &str) -> Result<ImageFormat, FormatError> {
    let (_, extension) = filename
        .rsplit_once('.')
        .ok_or_else(|| FormatError::MissingExtension(filename.to_string()))?;
    let extension = extension.to_lowercase();

    SUPPORTED
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, fmt)| *fmt)
        .ok_or_else(|| FormatError::Unsupported {
            extension,
            supported: supported_extensions(),
        })
}
