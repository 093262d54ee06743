//! # thumbcut
//!
//! Two single-shot image transforms that always write their result in the
//! source image's own format:
//!
//! - **Thumbnail**: render the source onto a canvas of the requested size,
//!   optionally adjusting one edge to the source aspect ratio.
//! - **Crop**: cut a rectangle out of the source, decoding only that window
//!   when the codec allows it.
//!
//! ```text
//! caller → format gate → { crop | thumbnail } → sink (writer or derived file)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Format gate, dimension math, backend trait and the `image`-crate backend, operations |
//! | [`naming`] | `thumb_<name>` / `cut_<millis>_<name>` destination conventions |
//! | [`config`] | Optional `config.toml` loading, merging onto stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Results, Logged Failures
//!
//! Every operation returns a [`Result`] whose error names what went wrong
//! ([`imaging::TransformError`]: missing source, unsupported format, missing
//! destination, I/O, codec). The same failure is logged through the `log`
//! facade where it is detected, so a caller that only wants best-effort
//! behaviour can drop the error and still leave a trace.
//!
//! ## Encode Before Write
//!
//! Backends return encoded bytes instead of writing files. A destination file
//! is only created once the full image is ready, so a failed call never leaves
//! an empty or truncated output behind.
//!
//! ## Compiled-In Format Table
//!
//! Supported formats come from a static extension table filtered by the
//! `image` features this binary was built with, not from whatever happens to
//! be installed on the machine. Results are the same on every host.
//!
//! ## Aspect Fit Kept As-Is
//!
//! The non-forced thumbnail size adjustment (see
//! [`imaging::calculate_fit_dimensions`]) is not the usual "fit inside the
//! box". Existing users depend on its output sizes, so it is reproduced
//! exactly and pinned by regression tests.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
