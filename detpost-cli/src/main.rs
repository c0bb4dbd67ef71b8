use clap::{Parser, Subcommand, ValueEnum};
use detpost::render::draw::load_rgb_image;
use detpost::{
    param_report, postprocess_batch, render_boxes, BatchNorm, ConvBlockSpec, DetectionBatch,
    ImageGeometry, NormalizedBox, Palette,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Detection post-processing CLI")]
struct Cli {
    /// Enable tracing output for pipeline profiling.
    #[arg(long)]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw detections from a JSON file onto an image.
    Draw(DrawArgs),
    /// Print parameter accounting for a conv block configuration.
    Params(ParamsArgs),
}

#[derive(clap::Args, Debug)]
struct DrawArgs {
    /// Input image path.
    #[arg(short, long, value_name = "FILE")]
    image: PathBuf,
    /// Detections JSON file with parallel boxes/scores/classes arrays.
    #[arg(short, long, value_name = "FILE")]
    detections: PathBuf,
    /// Output image path.
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
    /// Minimum confidence for a box to be drawn.
    #[arg(long, default_value_t = 0.5)]
    min_score: f32,
    /// Outline stroke width in pixels.
    #[arg(long, default_value_t = 2)]
    thickness: u32,
}

#[derive(clap::Args, Debug)]
struct ParamsArgs {
    /// Spatial kernel size (odd).
    #[arg(short, long, default_value_t = 3)]
    kernel_size: u32,
    /// Channels entering the block.
    #[arg(short, long)]
    input_channels: u32,
    /// Channels leaving the block.
    #[arg(short, long)]
    output_channels: u32,
    /// Spatial stride.
    #[arg(short, long, default_value_t = 2)]
    stride: u32,
    /// Batch-norm accounting convention.
    #[arg(long, value_enum, default_value = "with-running-stats")]
    batch_norm: BatchNormArg,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum BatchNormArg {
    /// Learnable scale and shift only (2 per channel).
    ScaleShift,
    /// Scale, shift, and running statistics (4 per channel).
    WithRunningStats,
}

impl From<BatchNormArg> for BatchNorm {
    fn from(value: BatchNormArg) -> Self {
        match value {
            BatchNormArg::ScaleShift => BatchNorm::ScaleShift,
            BatchNormArg::WithRunningStats => BatchNorm::WithRunningStats,
        }
    }
}

/// Detections file layout: three parallel arrays, boxes as
/// `[top, left, bottom, right]` fractions.
#[derive(Debug, Deserialize)]
struct DetectionsFile {
    boxes: Vec<[f32; 4]>,
    scores: Vec<f32>,
    classes: Vec<u32>,
}

impl TryFrom<DetectionsFile> for DetectionBatch {
    type Error = detpost::DetPostError;

    fn try_from(value: DetectionsFile) -> Result<Self, Self::Error> {
        let boxes = value
            .boxes
            .into_iter()
            .map(NormalizedBox::from_array)
            .collect();
        DetectionBatch::new(boxes, value.scores, value.classes)
    }
}

#[derive(Debug, Serialize)]
struct ParamOutput {
    vanilla: u64,
    separable: u64,
    ratio: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("detpost=info".parse()?))
            .with_target(false)
            .init();
    }

    match cli.command {
        Command::Draw(args) => run_draw(args),
        Command::Params(args) => run_params(args),
    }
}

fn run_draw(args: DrawArgs) -> Result<(), Box<dyn std::error::Error>> {
    let detections_text = fs::read_to_string(&args.detections)?;
    let parsed: DetectionsFile = serde_json::from_str(&detections_text)?;
    let batch = DetectionBatch::try_from(parsed)?;

    let mut img = load_rgb_image(&args.image)?;
    let geometry = ImageGeometry::new(img.height(), img.width())?;

    let result = postprocess_batch(&batch, args.min_score, geometry)?;
    render_boxes(
        &mut img,
        &result.pixel_boxes,
        result.batch.classes(),
        &Palette::standard(),
        args.thickness,
    )?;
    img.save(&args.output)?;

    println!(
        "kept {} of {} detections -> {}",
        result.batch.len(),
        batch.len(),
        args.output.display()
    );
    Ok(())
}

fn run_params(args: ParamsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let spec = ConvBlockSpec::new(
        args.kernel_size,
        args.input_channels,
        args.output_channels,
        args.stride,
    )?;
    let report = param_report(&spec, args.batch_norm.into())?;
    let output = ParamOutput {
        vanilla: report.vanilla,
        separable: report.separable,
        ratio: report.ratio,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
