use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thumbcut::config;
use thumbcut::imaging::{self, Region, RustBackend};
use thumbcut::output;

#[derive(Parser)]
#[command(name = "thumbcut")]
#[command(about = "Thumbnail and crop images, keeping the source format")]
#[command(long_about = "\
Thumbnail and crop images, keeping the source format

The output is always encoded in the format of the source, chosen by its
file extension. Run 'thumbcut formats' for the list this build supports.

Without --output, files are written next to the source (thumbnails) or
into --dest (crops):

  thumbcut thumbnail imgs/Tulips.jpg 150 100   → imgs/thumb_Tulips.jpg
  thumbcut crop imgs/Tulips.jpg 250 70 300 400 → imgs/cut_<millis>_Tulips.jpg

Run 'thumbcut gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a thumbnail, keeping the aspect ratio unless --force is given
    Thumbnail {
        source: PathBuf,
        width: u32,
        height: u32,
        /// Output exactly WIDTHxHEIGHT, stretching the image if needed
        #[arg(long, overrides_with = "no_force")]
        force: bool,
        /// Keep the aspect ratio even if config.toml sets force = true
        #[arg(long, overrides_with = "force")]
        no_force: bool,
        /// Prefix for the file written next to the source
        #[arg(long)]
        prefix: Option<String>,
        /// Write to this file instead of next to the source
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Cut a rectangle out of an image
    Crop {
        source: PathBuf,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        /// Existing directory (or file beside which) to write the crop
        #[arg(long)]
        dest: Option<PathBuf>,
        /// Write to this file instead of a derived name
        #[arg(short, long, conflicts_with = "dest")]
        output: Option<PathBuf>,
    },
    /// List the image formats this build can both read and write
    Formats,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let tool_config = config::load_config(cli.config.as_deref())?;
    let backend = RustBackend::new();

    match cli.command {
        Command::Thumbnail {
            source,
            width,
            height,
            force,
            no_force,
            prefix,
            output: out_path,
        } => {
            let force = match (force, no_force) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let spec = tool_config.thumbnail_spec(width, height, force, prefix);
            let render = tool_config.thumbnail_config();
            match out_path {
                Some(path) => {
                    let sink = create_output(&path)?;
                    let dims =
                        imaging::thumbnail_to_writer(&backend, &source, &spec, &render, sink)
                            .inspect_err(|_| discard_output(&path))?;
                    output::print_thumbnail_output(&source, &path, Some(dims));
                }
                None => {
                    let path = imaging::thumbnail_to_path(&backend, &source, &spec, &render)?;
                    output::print_thumbnail_output(&source, &path, None);
                }
            }
        }
        Command::Crop {
            source,
            x,
            y,
            width,
            height,
            dest,
            output: out_path,
        } => {
            let region = Region::new(x, y, width, height);
            match out_path {
                Some(path) => {
                    let mut sink = create_output(&path)?;
                    imaging::crop_to_writer(&backend, &source, region, &mut sink)
                        .inspect_err(|_| discard_output(&path))?;
                    output::print_crop_output(&source, &path, &region);
                }
                None => {
                    let dest = dest.unwrap_or_else(|| default_crop_dest(&source));
                    let path = imaging::crop_to_path(
                        &backend,
                        &source,
                        region,
                        &dest,
                        &tool_config.crop_config(),
                    )?;
                    output::print_crop_output(&source, &path, &region);
                }
            }
        }
        Command::Formats => {
            output::print_formats_output(imaging::supported_formats());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize `env_logger`; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn create_output(path: &Path) -> std::io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Remove an output file created before a failed operation.
fn discard_output(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::debug!("Could not remove {}: {}", path.display(), e);
    }
}

/// Crops go next to the source when no destination is given.
fn default_crop_dest(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
