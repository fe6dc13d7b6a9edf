//! Managed vs native spanning tree on random points, then a tour from the tree.
//!
//! ```text
//! cargo run --release --example compare -- --points 400 --seed 7
//! cargo run --release --example compare -- --library target/release/libminspan.so
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use minspan::span::{time_backend, total_weight};
use minspan::tour::tour_length;
use minspan::{build_tour_from_edges, Backend, MinSpan, Point};
use rand::prelude::*;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

const BORDER: i32 = 4;
const LABEL_HEIGHT: i32 = 16;

#[derive(Parser, Debug)]
#[command(about = "Time the managed and native spanning-tree backends")]
struct Args {
    /// Number of random points.
    #[arg(short, long, default_value_t = 200)]
    points: usize,

    /// RNG seed; random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Canvas width.
    #[arg(long, default_value_t = 1600)]
    width: i32,

    /// Canvas height.
    #[arg(long, default_value_t = 900)]
    height: i32,

    /// Run only this backend instead of both.
    #[arg(short, long)]
    backend: Option<Backend>,

    /// Load the native routine from this shared library instead of the bundled one.
    #[arg(short, long)]
    library: Option<PathBuf>,

    /// Log every computation.
    #[arg(short, long)]
    verbose: bool,
}

fn random_points(rng: &mut dyn RngCore, n: usize, width: i32, height: i32) -> Vec<Point> {
    // Keep clear of the edges and of the timing label along the bottom.
    let (x_lo, y_lo) = (BORDER, LABEL_HEIGHT + BORDER);
    let x_hi = (width - BORDER).max(x_lo + 1);
    let y_hi = (height - BORDER).max(y_lo + 1);
    (0..n)
        .map(|_| Point::new(rng.random_range(x_lo..x_hi), rng.random_range(y_lo..y_hi)))
        .collect()
}

fn main() -> ExitCode {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber is already installed");
    }

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(rand::rng()),
    };
    let points = random_points(&mut *rng, args.points, args.width, args.height);
    info!(points = points.len(), "generated points");

    let backends = match args.backend {
        Some(b) => vec![b],
        None => vec![Backend::Managed, Backend::Native],
    };

    let mut results = Vec::new();
    for backend in backends {
        let span = match (backend, &args.library) {
            (Backend::Native, Some(path)) => MinSpan::load_native(path),
            _ => MinSpan::new(backend),
        };
        let span = match span {
            Ok(span) => span,
            Err(e) => {
                error!(%backend, "cannot run backend: {e}");
                return ExitCode::FAILURE;
            }
        };
        match time_backend(&span, &points) {
            Ok((edges, elapsed)) => {
                println!("{backend:>8}: {:.6} seconds", elapsed.as_secs_f64());
                results.push(edges);
            }
            Err(e) => {
                error!(%backend, "computation failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let [managed, native] = results.as_slice() {
        println!(
            "backends agree: {}",
            if managed == native { "yes" } else { "NO" }
        );
    }

    let Some(edges) = results.first() else {
        return ExitCode::SUCCESS;
    };
    println!("tree weight (squared): {}", total_weight(&points, edges));
    match build_tour_from_edges(&points, edges) {
        Ok(tour) => println!("tour length: {:.1}", tour_length(&tour)),
        Err(e) => {
            error!("tour failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
