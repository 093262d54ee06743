//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure and do no I/O.
//!
//! ```text
//! Thumbnail 200x100
//!     Source: imgs/Tulips.jpg
//!     Output: imgs/thumb_Tulips.jpg
//! ```

use crate::imaging::{Dimensions, Region};
use image::ImageFormat;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn context_line(label: &str, value: &str) -> String {
    format!("{}{}: {}", indent(1), label, value)
}

pub fn format_thumbnail_output(
    source: &Path,
    output: &Path,
    dims: Option<Dimensions>,
) -> Vec<String> {
    let header = match dims {
        Some(d) => format!("Thumbnail {}x{}", d.width, d.height),
        None => "Thumbnail".to_string(),
    };
    vec![
        header,
        context_line("Source", &source.display().to_string()),
        context_line("Output", &output.display().to_string()),
    ]
}

pub fn print_thumbnail_output(source: &Path, output: &Path, dims: Option<Dimensions>) {
    for line in format_thumbnail_output(source, output, dims) {
        println!("{}", line);
    }
}

pub fn format_crop_output(source: &Path, output: &Path, region: &Region) -> Vec<String> {
    vec![
        format!(
            "Crop {}x{} at ({}, {})",
            region.width, region.height, region.x, region.y
        ),
        context_line("Source", &source.display().to_string()),
        context_line("Output", &output.display().to_string()),
    ]
}

pub fn print_crop_output(source: &Path, output: &Path, region: &Region) {
    for line in format_crop_output(source, output, region) {
        println!("{}", line);
    }
}

/// One line per supported extension: `ext  codec`.
pub fn format_formats_output(formats: &[(&str, ImageFormat)]) -> Vec<String> {
    let width = formats.iter().map(|(ext, _)| ext.len()).max().unwrap_or(0);
    formats
        .iter()
        .map(|(ext, fmt)| format!("{:<width$}  {:?}", ext, fmt))
        .collect()
}

pub fn print_formats_output(formats: &[(&str, ImageFormat)]) {
    for line in format_formats_output(formats) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_four_spaces_per_level() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn thumbnail_output_with_dimensions() {
        let lines = format_thumbnail_output(
            Path::new("imgs/Tulips.jpg"),
            Path::new("imgs/thumb_Tulips.jpg"),
            Some(Dimensions {
                width: 200,
                height: 100,
            }),
        );
        assert_eq!(
            lines,
            vec![
                "Thumbnail 200x100",
                "    Source: imgs/Tulips.jpg",
                "    Output: imgs/thumb_Tulips.jpg",
            ]
        );
    }

    #[test]
    fn thumbnail_output_without_dimensions() {
        let lines = format_thumbnail_output(Path::new("a.png"), Path::new("thumb_a.png"), None);
        assert_eq!(lines[0], "Thumbnail");
    }

    #[test]
    fn crop_output_header() {
        let lines = format_crop_output(
            Path::new("a.png"),
            Path::new("out/cut_1_a.png"),
            &Region::new(250, 70, 300, 400),
        );
        assert_eq!(lines[0], "Crop 300x400 at (250, 70)");
        assert_eq!(lines[2], "    Output: out/cut_1_a.png");
    }

    #[test]
    fn formats_output_aligned() {
        let lines =
            format_formats_output(&[("png", ImageFormat::Png), ("jpeg", ImageFormat::Jpeg)]);
        assert_eq!(lines, vec!["png   Png", "jpeg  Jpeg"]);
    }

    #[test]
    fn formats_output_empty() {
        assert!(format_formats_output(&[]).is_empty());
    }
}
