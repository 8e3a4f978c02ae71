// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectscan — command-line front end.
//
// Entry point. Initialises logging, decodes the input image, runs the
// detector and prints `[{ "id": .., "coordinates": [[x, y]; 4] }, ..]` to
// stdout.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rectscan_core::{CaliperEdges, CornerOrder, DetectorConfig, FitPolicy};
use rectscan_detect::{RectangleDetector, decode};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Minimum-area oriented bounding box (default).
    Calipers,
    /// Exhaustive 4-point search; slow, for comparison only.
    BruteForce,
}

#[derive(Debug, Parser)]
#[command(name = "rectscan")]
#[command(about = "Detect rectangles in an image and print their corners as JSON")]
#[command(version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, ...).
    image: PathBuf,

    /// JSON detector configuration; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rectangle fitting strategy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Take caliper orientations from the convex hull instead of contour order.
    #[arg(long)]
    hull: bool,

    /// Discard contours with this many points or fewer.
    #[arg(long)]
    min_points: Option<usize>,

    /// Gradient magnitude a pixel must exceed to count as an edge.
    #[arg(long)]
    edge_threshold: Option<f64>,

    /// Gaussian blur sigma applied before edge detection.
    #[arg(long)]
    blur: Option<f32>,

    /// Order corners clockwise from the top-left.
    #[arg(long)]
    normalize_corners: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    /// Start from the config file (or defaults) and apply flag overrides.
    fn detector_config(&self) -> CliResult<DetectorConfig> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::from_json_file(path)?,
            None => DetectorConfig::default(),
        };
        if let Some(policy) = self.policy {
            config.fit_policy = match policy {
                PolicyArg::Calipers => FitPolicy::RotatingCalipers,
                PolicyArg::BruteForce => FitPolicy::BruteForceQuad,
            };
        }
        if self.hull {
            config.caliper_edges = CaliperEdges::ConvexHull;
        }
        if let Some(min_points) = self.min_points {
            config.min_contour_points = min_points;
        }
        if let Some(threshold) = self.edge_threshold {
            config.edge_threshold = threshold;
        }
        if let Some(sigma) = self.blur {
            config.blur_sigma = Some(sigma);
        }
        if self.normalize_corners {
            config.corner_order = CornerOrder::ClockwiseFromTopLeft;
        }
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        tracing::error!(error = %err, "rectscan failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let detector = RectangleDetector::new(cli.detector_config()?)?;
    tracing::debug!(fitter = detector.fitter().name(), "Detector ready");

    let image = decode::open(&cli.image)?;
    let records = detector.detect_records(&image);

    let json = if cli.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{json}");
    Ok(())
}
