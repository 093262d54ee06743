//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::Region;

/// Adjust a requested thumbnail size to the source aspect ratio.
///
/// Only the axis picked by the ratio comparison is recomputed, and only when
/// the matching source edge exceeds the request:
///
/// - `width / w < height / h` and `width > w` → `h = round(height * w / width)`
/// - otherwise, `height > h` → `w = round(width * h / height)`
///
/// Rounding is to the nearest integer with exact `.5` ties going to the even
/// neighbour, so `4.5` becomes `4` and `5.5` becomes `6`.
///
/// The branch pairing differs from a "fit inside the box" fit (a 400x200
/// source asked for 100x100 yields 200x100, not 100x50). Existing callers
/// depend on it; see the regression tests below.
///
/// # Arguments
/// * `source` - Natural image dimensions (width, height)
/// * `target` - Requested thumbnail dimensions (w, h), both non-zero
///
/// # Returns
/// * `(w, h)` - Canvas dimensions
pub fn calculate_fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (mut w, mut h) = target;

    let width_ratio = src_w as f64 / w as f64;
    let height_ratio = src_h as f64 / h as f64;

    if width_ratio < height_ratio {
        if src_w > w {
            h = (src_h as f64 * w as f64 / src_w as f64).round_ties_even() as u32;
        }
    } else if src_h > h {
        w = (src_w as f64 * h as f64 / src_h as f64).round_ties_even() as u32;
    }

    (w, h)
}

/// Final canvas size for a thumbnail request.
///
/// `force` skips the aspect adjustment and returns the request verbatim.
pub fn calculate_canvas_dimensions(
    source: (u32, u32),
    target: (u32, u32),
    force: bool,
) -> (u32, u32) {
    if force {
        target
    } else {
        calculate_fit_dimensions(source, target)
    }
}

/// Whether a crop region is non-empty and lies fully inside an image.
pub fn region_within(region: &Region, bounds: (u32, u32)) -> bool {
    let (img_w, img_h) = bounds;
    let right = region.x.checked_add(region.width);
    let bottom = region.y.checked_add(region.height);

    region.width > 0
        && region.height > 0
        && right.is_some_and(|r| r <= img_w)
        && bottom.is_some_and(|b| b <= img_h)
}
