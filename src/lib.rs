//! Aeroprep: aerial-imagery detection dataset preparation.
//!
//! Aeroprep takes a flat directory of aerial images and their YOLO-style
//! label files, reports class-distribution statistics, renders a random
//! annotated sample for visual inspection, and splits the validated
//! image/label pairs into the standard `images/{train,val}` +
//! `labels/{train,val}` training layout.
//!
//! # Modules
//!
//! - [`label`]: label-line parsing and file probing (the core contract)
//! - [`source`]: source-directory scanning and image/label pairing
//! - [`stats`]: class-distribution statistics
//! - [`preview`]: random annotated-sample rendering
//! - [`split`]: train/val splitting and materialization
//! - [`error`]: error types for aeroprep operations

pub mod error;
pub mod label;
pub mod preview;
pub mod source;
pub mod split;
pub mod stats;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

pub use error::AeroprepError;

use preview::PreviewOptions;
use split::SplitOptions;
use stats::StatsOptions;

/// The aeroprep CLI application.
#[derive(Parser)]
#[command(name = "aeroprep")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Report class statistics and render a random annotated sample.
    Analyze(AnalyzeArgs),
    /// Split validated image/label pairs into train and val partitions.
    Split(SplitArgs),
}

/// Arguments for the analyze subcommand.
#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Source directory containing images and label files.
    source_dir: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Where to write the annotated sample image.
    #[arg(long, default_value = "annotated_sample.png")]
    preview_out: PathBuf,

    /// Skip rendering the annotated sample.
    #[arg(long)]
    no_preview: bool,

    /// Seed for random sample selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Image extensions considered during discovery.
    #[arg(long = "image-ext", value_delimiter = ',', default_values_t = default_extensions())]
    image_ext: Vec<String>,
}

/// Arguments for the split subcommand.
#[derive(clap::Args)]
struct SplitArgs {
    /// Source directory containing images and label files.
    source_dir: PathBuf,

    /// Output directory for the train/val tree.
    output_dir: PathBuf,

    /// Fraction of valid pairs assigned to train.
    #[arg(long, default_value_t = 0.8, value_parser = validate_ratio)]
    ratio: f64,

    /// Seed for shuffling.
    #[arg(long)]
    seed: Option<u64>,

    /// Image extensions considered during discovery.
    #[arg(long = "image-ext", value_delimiter = ',', default_values_t = default_extensions())]
    image_ext: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    source::default_image_extensions()
}

// Validate that the ratio lies strictly inside (0, 1)
fn validate_ratio(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if val > 0.0 && val < 1.0 => Ok(val),
        _ => Err("RATIO must be strictly between 0.0 and 1.0".to_string()),
    }
}

/// Run the aeroprep CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AeroprepError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(args),
        Some(Commands::Split(args)) => run_split(args),
        None => {
            println!("aeroprep {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Aerial-imagery detection dataset preparation.");
            println!();
            println!("Run 'aeroprep --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the analyze subcommand: statistics first, then the sample
/// preview. A preview failure is reported but does not fail the run.
fn run_analyze(args: AnalyzeArgs) -> Result<(), AeroprepError> {
    let report = stats::analyze_source_dir(&args.source_dir, &StatsOptions::default())?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", report),
    }

    if args.no_preview {
        return Ok(());
    }

    let opts = PreviewOptions {
        seed: args.seed,
        image_extensions: args.image_ext,
    };
    match preview::render_random_sample(&args.source_dir, &args.preview_out, &opts) {
        Ok(sample) => {
            println!();
            println!("Sample: {}", sample.source_image.display());
            for (class_id, count) in &sample.boxes_per_class {
                println!("  class {}: {} box(es)", class_id, count);
            }
            println!("Annotated copy written to {}", sample.output_path.display());
        }
        Err(err) => eprintln!("sample preview skipped: {err}"),
    }

    Ok(())
}

/// Execute the split subcommand.
fn run_split(args: SplitArgs) -> Result<(), AeroprepError> {
    let opts = SplitOptions {
        ratio: args.ratio,
        seed: args.seed,
        image_extensions: args.image_ext,
    };

    let report = split::split_dataset(&args.source_dir, &args.output_dir, &opts)?;
    print!("{}", report);
    println!("Dataset written to {}", args.output_dir.display());

    Ok(())
}
