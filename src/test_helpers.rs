//! Shared test utilities for the thumbcut test suite.
//!
//! Synthetic images are generated on the fly so tests never depend on
//! checked-in binaries. The gradient is a pure function of the pixel position,
//! which lets crop tests check that output pixels came from the right place.

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::path::Path;
use std::sync::Once;

/// Pixel value of the synthetic gradient at `(x, y)`.
pub fn gradient_pixel(x: u32, y: u32) -> Rgb<u8> {
    Rgb([(x % 256) as u8, (y % 256) as u8, 128])
}

/// Write a `width` x `height` gradient image in `format`.
pub fn write_gradient(path: &Path, format: ImageFormat, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, gradient_pixel);
    img.save_with_format(path, format).unwrap();
}

/// Write a fully transparent RGBA PNG.
pub fn write_transparent_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

// =========================================================================
// Log capture
// =========================================================================

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records every log line on the thread that emitted it, so parallel tests
/// each see only their own records.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| {
            c.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Run `f` and return the log records it emitted on this thread.
pub fn capture_logs(f: impl FnOnce()) -> Vec<(Level, String)> {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
    f();
    CAPTURED.with(|c| c.borrow_mut().drain(..).collect())
}
