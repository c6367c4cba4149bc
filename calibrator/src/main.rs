use anyhow::Context;
use clap::Parser;
use hailcore::calibration::calibrate;
use picker::IcedPointPicker;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

mod picker;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Click two reference points on a frame and save the pixel ratio"
)]
struct Args {
    /// Reference frame taken from the camera video (PNG, JPEG, ...)
    #[arg(long)]
    image: PathBuf,
    /// Real-world distance between the two points; asked for when omitted
    #[arg(long)]
    distance: Option<f64>,
    #[arg(long, default_value = "pixelToMeter.txt")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let distance = match args.distance {
        Some(distance) => distance,
        None => prompt_distance()?,
    };

    let mut picker = IcedPointPicker::new(args.image.clone());
    let ratio = calibrate(&mut picker, distance)
        .context("no valid ratio obtained, run the calibration again")?;
    ratio
        .save(&args.output)
        .with_context(|| format!("saving ratio to {}", args.output.display()))?;

    println!("Ratio saved to {}", args.output.display());
    Ok(())
}

fn prompt_distance() -> anyhow::Result<f64> {
    print!("Enter the real-world distance between the two selected points: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading distance from stdin")?;
    line.trim()
        .parse()
        .with_context(|| format!("{:?} is not a distance", line.trim()))
}
