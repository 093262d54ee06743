//! Pure Rust image processing backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::with_format(..).into_dimensions()` (header only) |
//! | Windowed decode (BMP) | `BmpDecoder` + `ImageDecoderRect::read_rect` |
//! | Full decode (everything else) | `image::ImageReader` with the gated format |
//! | Crop fallback | `DynamicImage::crop_imm` |
//! | Thumbnail resize | `DynamicImage::resize_exact` with the configured filter |
//! | Canvas fill | `image::imageops::overlay` onto a solid background |
//! | Encode | `DynamicImage::write_to` into memory, same format as the source |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::region_within;
use super::params::{CropParams, Region, ThumbnailParams};
use image::codecs::bmp::BmpDecoder;
use image::{
    ColorType, DynamicImage, ImageBuffer, ImageDecoder, ImageDecoderRect, ImageFormat,
    ImageReader, Rgba, RgbaImage,
};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Formats whose decoder can read a sub-rectangle without decoding the rest.
pub fn supports_windowed_decode(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Bmp)
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &Path) -> Result<BufReader<File>, BackendError> {
    Ok(BufReader::new(File::open(path)?))
}

/// Load and decode a whole image from disk.
fn load_image(path: &Path, format: ImageFormat) -> Result<DynamicImage, BackendError> {
    ImageReader::with_format(open(path)?, format)
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

fn out_of_bounds(region: &Region, bounds: (u32, u32)) -> BackendError {
    BackendError::ProcessingFailed(format!(
        "Crop region {}x{}+{}+{} is outside image bounds ({}x{})",
        region.width, region.height, region.x, region.y, bounds.0, bounds.1
    ))
}

/// Decode only `region` of a BMP file.
fn decode_bmp_region(path: &Path, region: &Region) -> Result<DynamicImage, BackendError> {
    let mut decoder = BmpDecoder::new(open(path)?).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let bounds = decoder.dimensions();
    if !region_within(region, bounds) {
        return Err(out_of_bounds(region, bounds));
    }

    let color = decoder.color_type();
    let row_pitch = region.width as usize * color.bytes_per_pixel() as usize;
    let mut buf = vec![0u8; row_pitch * region.height as usize];
    decoder
        .read_rect(
            region.x,
            region.y,
            region.width,
            region.height,
            &mut buf,
            row_pitch,
        )
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })?;

    image_from_raw(color, region.width, region.height, buf)
}

/// Wrap raw decoder output in a `DynamicImage`.
fn image_from_raw(
    color: ColorType,
    width: u32,
    height: u32,
    buf: Vec<u8>,
) -> Result<DynamicImage, BackendError> {
    let image = match color {
        ColorType::L8 => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageLuma8),
        ColorType::La8 => {
            ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageLumaA8)
        }
        ColorType::Rgb8 => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageRgb8),
        ColorType::Rgba8 => {
            ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageRgba8)
        }
        other => {
            return Err(BackendError::ProcessingFailed(format!(
                "Unsupported decoded color type: {other:?}"
            )));
        }
    };
    image.ok_or_else(|| {
        BackendError::ProcessingFailed("Decoded buffer does not match region size".into())
    })
}

/// Decode `region`, windowed when the codec allows it.
fn decode_region(
    path: &Path,
    format: ImageFormat,
    region: &Region,
) -> Result<DynamicImage, BackendError> {
    if supports_windowed_decode(format) {
        return decode_bmp_region(path, region);
    }
    let img = load_image(path, format)?;
    let bounds = (img.width(), img.height());
    if !region_within(region, bounds) {
        return Err(out_of_bounds(region, bounds));
    }
    Ok(img.crop_imm(region.x, region.y, region.width, region.height))
}

/// Encode into memory in the given format.
fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, BackendError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|e| BackendError::ProcessingFailed(format!("{format:?} encode failed: {e}")))?;
    Ok(bytes)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path, format: ImageFormat) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::with_format(open(path)?, format)
            .into_dimensions()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
            })?;
        Ok(Dimensions { width, height })
    }

    fn crop(&self, params: &CropParams) -> Result<Vec<u8>, BackendError> {
        let region = decode_region(&params.source, params.format, &params.region)?;
        encode(&region, params.format)
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<Vec<u8>, BackendError> {
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Thumbnail size {}x{} has a zero edge",
                params.width, params.height
            )));
        }
        let img = load_image(&params.source, params.format)?;

        // Stretch to the canvas, then composite over the background so any
        // transparent source pixels come out as background.
        let resized = img.resize_exact(params.width, params.height, params.filter.into());
        let [r, g, b] = params.background;
        let mut canvas = RgbaImage::from_pixel(params.width, params.height, Rgba([r, g, b, 255]));
        image::imageops::overlay(&mut canvas, &resized.to_rgba8(), 0, 0);
        let rgb = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8());

        encode(&rgb, params.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Filter;
    use crate::test_helpers::{gradient_pixel, write_gradient, write_transparent_png};
    use image::GenericImageView;

    fn thumb_params(source: &Path, format: ImageFormat, w: u32, h: u32) -> ThumbnailParams {
        ThumbnailParams {
            source: source.to_path_buf(),
            format,
            width: w,
            height: h,
            filter: Filter::default(),
            background: [192, 192, 192],
        }
    }

    #[test]
    fn windowed_decode_only_for_bmp() {
        assert!(supports_windowed_decode(ImageFormat::Bmp));
        assert!(!supports_windowed_decode(ImageFormat::Png));
        assert!(!supports_windowed_decode(ImageFormat::Jpeg));
    }

    #[test]
    fn identify_synthetic_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.png");
        write_gradient(&path, ImageFormat::Png, 200, 150);

        let dims = RustBackend::new().identify(&path, ImageFormat::Png).unwrap();
        assert_eq!(dims, Dimensions { width: 200, height: 150 });
    }

    #[test]
    fn identify_uses_given_codec_not_content_sniffing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.png");
        write_gradient(&path, ImageFormat::Png, 20, 10);

        let result = RustBackend::new().identify(&path, ImageFormat::Bmp);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let result =
            RustBackend::new().identify(Path::new("/nonexistent/image.jpg"), ImageFormat::Jpeg);
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn crop_bmp_windowed_matches_source_pixels() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.bmp");
        write_gradient(&path, ImageFormat::Bmp, 600, 500);

        let bytes = RustBackend::new()
            .crop(&CropParams {
                source: path,
                format: ImageFormat::Bmp,
                region: Region::new(250, 70, 300, 400),
            })
            .unwrap();

        let out = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp).unwrap();
        assert_eq!(out.dimensions(), (300, 400));
        let out = out.to_rgb8();
        for (x, y) in [(0, 0), (299, 0), (0, 399), (299, 399), (17, 123)] {
            assert_eq!(*out.get_pixel(x, y), gradient_pixel(250 + x, 70 + y));
        }
    }

    #[test]
    fn crop_png_full_decode_matches_source_pixels() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.png");
        write_gradient(&path, ImageFormat::Png, 550, 470);

        let bytes = RustBackend::new()
            .crop(&CropParams {
                source: path,
                format: ImageFormat::Png,
                region: Region::new(250, 70, 300, 400),
            })
            .unwrap();

        let out = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgb8();
        assert_eq!(out.dimensions(), (300, 400));
        assert_eq!(*out.get_pixel(0, 0), gradient_pixel(250, 70));
        assert_eq!(*out.get_pixel(299, 399), gradient_pixel(549, 469));
    }

    #[test]
    fn crop_out_of_bounds_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let bmp = tmp.path().join("small.bmp");
        let png = tmp.path().join("small.png");
        write_gradient(&bmp, ImageFormat::Bmp, 100, 100);
        write_gradient(&png, ImageFormat::Png, 100, 100);

        let backend = RustBackend::new();
        for (source, format) in [(bmp, ImageFormat::Bmp), (png, ImageFormat::Png)] {
            let result = backend.crop(&CropParams {
                source,
                format,
                region: Region::new(50, 50, 60, 10),
            });
            assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        }
    }

    #[test]
    fn crop_keeps_jpeg_format() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.jpg");
        write_gradient(&path, ImageFormat::Jpeg, 320, 240);

        let bytes = RustBackend::new()
            .crop(&CropParams {
                source: path,
                format: ImageFormat::Jpeg,
                region: Region::new(10, 20, 64, 48),
            })
            .unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let out = image::load_from_memory(&bytes).unwrap();
        assert_eq!(out.dimensions(), (64, 48));
    }

    #[test]
    fn thumbnail_exact_canvas_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.jpg");
        write_gradient(&path, ImageFormat::Jpeg, 800, 600);

        let bytes = RustBackend::new()
            .thumbnail(&thumb_params(&path, ImageFormat::Jpeg, 150, 100))
            .unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let out = image::load_from_memory(&bytes).unwrap();
        assert_eq!(out.dimensions(), (150, 100));
    }

    #[test]
    fn thumbnail_is_rgb() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.png");
        write_transparent_png(&path, 40, 40);

        let bytes = RustBackend::new()
            .thumbnail(&thumb_params(&path, ImageFormat::Png, 20, 20))
            .unwrap();

        let out = image::load_from_memory(&bytes).unwrap();
        assert_eq!(out.color(), ColorType::Rgb8);
    }

    #[test]
    fn thumbnail_transparent_source_shows_background() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.png");
        write_transparent_png(&path, 40, 40);

        let bytes = RustBackend::new()
            .thumbnail(&ThumbnailParams {
                filter: Filter::Nearest,
                ..thumb_params(&path, ImageFormat::Png, 20, 20)
            })
            .unwrap();

        let out = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(out.get_pixel(5, 5).0, [192, 192, 192]);
    }

    #[test]
    fn thumbnail_zero_size_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.png");
        write_gradient(&path, ImageFormat::Png, 40, 40);

        let result = RustBackend::new().thumbnail(&thumb_params(&path, ImageFormat::Png, 0, 20));
        assert!(result.is_err());
    }

    #[test]
    fn thumbnail_mislabelled_file_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("not-really.png");
        std::fs::write(&path, b"plain text").unwrap();

        let result = RustBackend::new().thumbnail(&thumb_params(&path, ImageFormat::Png, 10, 10));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }
}
