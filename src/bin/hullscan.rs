use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use hullscan::algorithms::{Collinear, GrahamScan};
use hullscan::data::Point;
use hullscan::io::{self, PointSource};
use hullscan::render::{BraillePrinter, SvgPlot};

#[derive(Parser)]
#[command(name = "hullscan", version)]
#[command(about = "Convex hull of a point file, computed with a Graham scan")]
struct Cmd {
  /// JSON file with a "points" list of [x, y] pairs
  #[arg(default_value = "data/data.json")]
  input: PathBuf,

  /// Write the hull vertices as JSON
  #[arg(long, value_name = "PATH")]
  hull_out: Option<PathBuf>,

  /// Write an SVG plot of the points and the hull
  #[arg(long, value_name = "PATH")]
  svg: Option<PathBuf>,

  /// Print a Braille preview to the terminal
  #[arg(long)]
  preview: bool,

  /// Keep points lying on hull edges as vertices
  #[arg(long)]
  retain_collinear: bool,

  /// Save the default points to INPUT when it does not exist
  #[arg(long)]
  write_defaults: bool,

  /// Log more (-v, -vv, -vvv)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn main() -> Result<()> {
  let cmd = Cmd::parse();
  let level = match cmd.verbose {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  };
  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();

  let (points, source) = io::load_or_default(&cmd.input, cmd.write_defaults)
    .with_context(|| format!("loading points from {}", cmd.input.display()))?;
  match source {
    PointSource::File => {
      println!("Loaded {} points from {}", points.len(), cmd.input.display());
    }
    PointSource::Defaults { saved } => {
      println!("{} not found, using default points", cmd.input.display());
      if saved {
        println!(
          "Saved {} default points to {}",
          points.len(),
          cmd.input.display()
        );
      }
    }
  }

  let collinear = if cmd.retain_collinear {
    Collinear::Retain
  } else {
    Collinear::Exclude
  };
  let hull = GrahamScan::new().collinear(collinear).compute(&points);

  println!("Number of points: {}", points.len());
  println!("Number of hull points: {}", hull.len());
  println!("Convex Hull Points: {}", format_points(&hull));

  if let Some(path) = &cmd.hull_out {
    io::save_hull(path, &hull).with_context(|| format!("writing hull to {}", path.display()))?;
  }
  if let Some(path) = &cmd.svg {
    SvgPlot::new(&points, &hull)
      .save(path)
      .with_context(|| format!("writing plot to {}", path.display()))?;
  }
  if cmd.preview {
    print!("{}", BraillePrinter::new(&points, &hull));
  }
  Ok(())
}

fn format_points(points: &[Point<f64, 2>]) -> String {
  let pairs: Vec<String> = points
    .iter()
    .map(|pt| format!("({}, {})", pt.x_coord(), pt.y_coord()))
    .collect();
  format!("[{}]", pairs.join(", "))
}
