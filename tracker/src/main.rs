use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use generator::profile::{build_synthetic_log, GeneratorConfig};
use hailcore::calibration::{calibrate, FixedPoints, PixelPoint};
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Hailstone trajectory filter")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter a detection log into trajectory-annotated points
    Run(RunArgs),
    /// Derive the pixel ratio from two known points without the picker window
    Calibrate(CalibrateArgs),
    /// Write a synthetic detection log for dry runs
    Synth(SynthArgs),
}

#[derive(ClapArgs)]
struct RunArgs {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long)]
    log: Option<PathBuf>,
    #[arg(long)]
    calibration: Option<PathBuf>,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    max_radius_diff: Option<u32>,
    #[arg(long)]
    max_velocity_deviation: Option<f64>,
    /// Write a JSON summary of the run
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(ClapArgs)]
struct CalibrateArgs {
    /// First reference point as x,y
    #[arg(long)]
    p1: PixelPoint,
    /// Second reference point as x,y
    #[arg(long)]
    p2: PixelPoint,
    /// Real-world distance between the two points
    #[arg(long)]
    distance: f64,
    #[arg(long, default_value = "pixelToMeter.txt")]
    output: PathBuf,
}

#[derive(ClapArgs)]
struct SynthArgs {
    #[arg(long, default_value = "hailstoneData.txt")]
    output: PathBuf,
    #[arg(long, default_value_t = 3)]
    objects: usize,
    #[arg(long, default_value_t = 60)]
    frames: u32,
    #[arg(long, default_value_t = 20)]
    clutter: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Run(run) => run_workflow(run),
        Command::Calibrate(calibration) => run_calibration(calibration),
        Command::Synth(synth) => run_synth(synth),
    }
}

fn run_workflow(args: RunArgs) -> anyhow::Result<()> {
    let mut config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };
    if let Some(log) = args.log {
        config.detection_log = log;
    }
    if let Some(calibration) = args.calibration {
        config.calibration_file = calibration;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(max_radius_diff) = args.max_radius_diff {
        config.max_radius_diff = max_radius_diff;
    }
    if let Some(max_velocity_deviation) = args.max_velocity_deviation {
        config.max_velocity_deviation = max_velocity_deviation;
    }
    if args.report.is_some() {
        config.report = args.report;
    }

    let result = Runner::new(config.clone()).execute()?;

    if result.outcome.points.is_empty() {
        println!("No hailstones passed the filtering criteria.");
    } else {
        println!(
            "Filtered hailstones saved: {} entries ({} trajectories) -> {}",
            result.outcome.points.len(),
            result.outcome.trajectory_count(),
            config.output.display()
        );
    }
    Ok(())
}

fn run_calibration(args: CalibrateArgs) -> anyhow::Result<()> {
    let mut source = FixedPoints::pair(args.p1, args.p2);
    let ratio = calibrate(&mut source, args.distance)
        .context("no valid ratio obtained, nothing saved")?;
    ratio
        .save(&args.output)
        .with_context(|| format!("saving ratio to {}", args.output.display()))?;
    println!("Ratio {} saved to {}", ratio, args.output.display());
    Ok(())
}

fn run_synth(args: SynthArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        objects: args.objects,
        frames: args.frames,
        clutter: args.clutter,
        seed: args.seed,
        ..Default::default()
    };
    let log = build_synthetic_log(&config);
    log.write_to(&args.output)?;
    println!(
        "Synthetic log -> {} detections, {} lines written to {}",
        log.detections.len(),
        log.lines.len(),
        args.output.display()
    );
    Ok(())
}
