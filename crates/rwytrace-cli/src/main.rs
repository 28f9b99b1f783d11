//! rwytrace CLI — extract runway geometry from rasterized airport diagrams.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use rwytrace::{
    calibrate, extract_airport, AirportIdentity, DiagramFormatConfig, DocumentText, PixelGrid,
    PixelPoint,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "rwytrace")]
#[command(about = "Extract calibrated runway geometry from rasterized airport diagrams")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract runways from a diagram and write the airport model as JSON.
    Extract(CliExtractArgs),

    /// Derive and print the pixel-to-degree calibration only.
    Calibrate(CliCalibrateArgs),
}

#[derive(Debug, Clone, Args)]
struct CliExtractArgs {
    /// Path to the rasterized diagram image.
    #[arg(long)]
    image: PathBuf,

    /// Path to the plain text extraction of the source document.
    #[arg(long)]
    plain_text: PathBuf,

    /// Path to the glyph-preserving text extraction (keeps the ° symbols).
    #[arg(long)]
    rich_text: PathBuf,

    /// Path to write the extracted airport model (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Airport name for the model's identity fields.
    #[arg(long, default_value = "")]
    name: String,

    /// Airport location (city/state).
    #[arg(long, default_value = "")]
    location: String,

    /// Airport identifier, e.g. ATL.
    #[arg(long, default_value = "")]
    abbreviation: String,

    /// Magnetic variation in degrees.
    #[arg(long, default_value = "0.0")]
    variation: f32,

    #[command(flatten)]
    format: CliFormatArgs,
}

#[derive(Debug, Clone, Args)]
struct CliCalibrateArgs {
    /// Path to the rasterized diagram image.
    #[arg(long)]
    image: PathBuf,

    #[command(flatten)]
    format: CliFormatArgs,
}

/// Overrides for the diagram-format constants.
#[derive(Debug, Clone, Args)]
struct CliFormatArgs {
    /// X coordinate of the runway scan origin.
    #[arg(long)]
    scan_x: Option<i32>,

    /// Y coordinate of the runway scan origin.
    #[arg(long)]
    scan_y: Option<i32>,

    /// Minimum centerline length (pixels) for a trace to count as a runway.
    #[arg(long)]
    min_runway_length: Option<f64>,

    /// Luminance threshold below which a pixel counts as ink.
    #[arg(long)]
    ink_threshold: Option<u8>,
}

impl CliFormatArgs {
    fn into_config(self) -> DiagramFormatConfig {
        let mut config = DiagramFormatConfig::default();
        if let Some(x) = self.scan_x {
            config.scan_origin = PixelPoint::new(x, config.scan_origin.y);
        }
        if let Some(y) = self.scan_y {
            config.scan_origin = PixelPoint::new(config.scan_origin.x, y);
        }
        if let Some(min) = self.min_runway_length {
            config.min_runway_length_px = min;
        }
        if let Some(threshold) = self.ink_threshold {
            config.ink_threshold = threshold;
        }
        config
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => run_extract(args),
        Commands::Calibrate(args) => run_calibrate(args),
    }
}

fn run_extract(args: CliExtractArgs) -> CliResult<()> {
    let image = image::open(&args.image)?.to_luma8();
    let text = DocumentText {
        plain: fs::read_to_string(&args.plain_text)?,
        rich: fs::read_to_string(&args.rich_text)?,
    };
    let identity = AirportIdentity {
        name: args.name,
        location: args.location,
        abbreviation: args.abbreviation,
        magnetic_variation: args.variation,
    };
    let config = args.format.into_config();

    let model = extract_airport(
        &args.image.display().to_string(),
        &image,
        &text,
        identity,
        &config,
    )?;

    fs::write(&args.out, serde_json::to_string_pretty(&model)?)?;
    println!(
        "wrote {} path entries to {}",
        model.num_paths(),
        args.out.display()
    );
    Ok(())
}

fn run_calibrate(args: CliCalibrateArgs) -> CliResult<()> {
    let image = image::open(&args.image)?.to_luma8();
    let config = args.format.into_config();
    let grid = PixelGrid::from_image(&image, config.ink_threshold);
    let params = calibrate(&grid, &config)?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
