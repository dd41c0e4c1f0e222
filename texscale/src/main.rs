use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use texscale::config::DEFAULT_FACTOR;
use texscale::transform::{DEFAULT_MAX_OUTPUT_BYTES, ScaleFactor};
use texscale::{PipelineConfig, upscale_file};

/// Pixel-art texture upscaler
#[derive(Parser, Debug)]
#[command(name = "texscale", version)]
#[command(about = "Enlarge an image by an integer factor with nearest-neighbor sampling", long_about = None)]
struct Args {
    /// Input image (PNG, JPEG, BMP, GIF or WebP)
    input: PathBuf,

    /// Output PNG path (".png" is appended if missing)
    output: PathBuf,

    /// Scale factor
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_FACTOR,
        value_parser = clap::value_parser!(u32).range(ScaleFactor::MIN as i64..=ScaleFactor::MAX as i64)
    )]
    factor: u32,

    /// Largest output image, in bytes, the upscaler may allocate
    #[arg(long, env = "TEXSCALE_MAX_OUTPUT_BYTES", default_value_t = DEFAULT_MAX_OUTPUT_BYTES)]
    max_output_bytes: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = PipelineConfig::default()
        .with_factor(args.factor)
        .with_max_output_bytes(args.max_output_bytes);

    let report = upscale_file(&args.input, &args.output, &config)?;

    println!(
        "{}x{} -> {}x{}: {}",
        report.source.0,
        report.source.1,
        report.output.0,
        report.output.1,
        report.path.display()
    );

    Ok(())
}
