//! Example: repeated motion updates on a uniform belief.
//!
//! Builds a synthetic red/green world map, initializes a uniform belief over
//! it, drops most of the mass on one cell to make the spread visible, and
//! runs `steps` blur updates. Each step logs the total mass, the peak cell and
//! the mass left on the starting cell.
//!
//! Settings come from an optional JSON file and are overridden by flags:
//!   cargo run -p histogram-filter --example motion -- --help
//!   cargo run -p histogram-filter --example motion -- --rows 5 --cols 7 --blurring 0.3
//!   RUST_LOG=debug cargo run -p histogram-filter --example motion

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use histogram_filter::{BlurConfig, BlurFilter, DomainPolicy, Grid, initialize_beliefs};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Run blur motion updates over a toroidal belief grid")]
struct Args {
    /// JSON file with a `MotionConfig`; flags below take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    /// Number of motion updates
    #[arg(long)]
    steps: Option<usize>,

    /// Blur coefficient in [0, 1]
    #[arg(long)]
    blurring: Option<f32>,

    /// Reject out-of-range coefficients instead of clamping them
    #[arg(long, default_value_t = false)]
    strict: bool,
}

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct MotionConfig {
    rows: usize,
    cols: usize,
    steps: usize,
    blur: BlurConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 8,
            steps: 5,
            blur: BlurConfig::default(),
        }
    }
}

impl MotionConfig {
    fn load(args: &Args) -> Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Self::default(),
        };

        if let Some(rows) = args.rows {
            cfg.rows = rows;
        }
        if let Some(cols) = args.cols {
            cfg.cols = cols;
        }
        if let Some(steps) = args.steps {
            cfg.steps = steps;
        }
        if let Some(blurring) = args.blurring {
            cfg.blur.blurring = blurring;
        }
        if args.strict {
            cfg.blur.domain = DomainPolicy::Reject;
        }

        ensure!(cfg.rows > 0 && cfg.cols > 0, "rows and cols must be > 0");
        Ok(cfg)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn synthetic_world(rows: usize, cols: usize) -> Result<Grid<char>> {
    let cells = (0..rows * cols)
        .map(|i| if (i / cols + i % cols) % 3 == 0 { 'r' } else { 'g' })
        .collect();
    Grid::from_vec(rows, cols, cells).context("building world map")
}

fn peak(belief: &Grid<f32>) -> (usize, usize, f32) {
    let (idx, &p) = belief
        .data()
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .unwrap_or((0, &0.0));
    (idx / belief.cols(), idx % belief.cols(), p)
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cfg = MotionConfig::load(&args)?;
    info!(
        rows = cfg.rows,
        cols = cfg.cols,
        steps = cfg.steps,
        blurring = cfg.blur.blurring,
        "starting motion run"
    );

    let world = synthetic_world(cfg.rows, cfg.cols)?;
    let mut belief = initialize_beliefs(&world);
    info!(p = belief.data()[0], "uniform belief");

    // Concentrate half the mass on the origin so the blur has something to
    // spread; the total stays 1.
    belief.data_mut().iter_mut().for_each(|p| *p *= 0.5);
    belief.data_mut()[0] += 0.5;

    let mut filter = BlurFilter::from_config(&cfg.blur).context("configuring blur")?;
    for step in 1..=cfg.steps {
        belief = filter.blur_step(&belief).context("blur step")?;
        let (r, c, p) = peak(&belief);
        info!(
            step,
            mass = belief.sum(),
            peak_row = r,
            peak_col = c,
            peak = p,
            origin = belief.data()[0],
            "motion update"
        );
    }

    for row in belief.iter_rows() {
        let line: Vec<String> = row.iter().map(|p| format!("{p:.4}")).collect();
        println!("{}", line.join(" "));
    }

    Ok(())
}
