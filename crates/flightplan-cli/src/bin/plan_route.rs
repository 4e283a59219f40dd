//! Plan Route - sequence a route file and print the kneeboard.
//!
//! Usage:
//!   cargo run -p flightplan-cli --bin plan_route -- route.json
//!   cargo run -p flightplan-cli --bin plan_route -- --demo --json

use anyhow::{bail, Context, Result};
use clap::Parser;
use flightplan_cli::demo::demo_route;
use flightplan_cli::{init_tracing, plan_output, render_kneeboard, Config};
use flightplan_core::{LegSequencer, Route};
use std::fs;
use std::path::PathBuf;

/// Flight plan leg sequencer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Route JSON file (waypoints + params)
    route: Option<PathBuf>,

    /// Plan the built-in demo route instead of a file
    #[arg(long)]
    demo: bool,

    /// Print the plan as JSON instead of a kneeboard table
    #[arg(long)]
    json: bool,

    /// Projection reference meridian (defaults to the departure longitude)
    #[arg(long, allow_negative_numbers = true)]
    reference_meridian: Option<f64>,

    /// Segments per sampled turn arc
    #[arg(long)]
    arc_points: Option<usize>,
}

fn load_route(args: &Args) -> Result<Route> {
    match (&args.route, args.demo) {
        (_, true) => Ok(demo_route()),
        (Some(path), false) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading route file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing route file {}", path.display()))
        }
        (None, false) => bail!("no route given; pass a route file or --demo"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env();
    if args.reference_meridian.is_some() {
        config.reference_meridian_deg = args.reference_meridian;
    }
    if let Some(points) = args.arc_points {
        config.arc_points = points;
    }
    init_tracing(config.log_format)?;

    let route = load_route(&args)?;
    for problem in route.validate() {
        tracing::warn!("Route validation: {}", problem);
    }

    let departure_lon = route.waypoints.first().map(|wp| wp.lon).unwrap_or(0.0);
    let engine = config.engine_config(departure_lon);
    let projector = engine
        .projector()
        .context("building projection from configuration")?;
    tracing::info!(
        "Planning {} legs about meridian {:.3}",
        route.leg_count(),
        engine.projection.reference_meridian_deg
    );

    let plan = LegSequencer::new(&projector).sequence(&route);
    for (index, err) in plan.failures() {
        tracing::warn!("Leg {} failed: {}", index + 1, err);
    }

    if args.json {
        let output = plan_output(&route, &plan, &projector, engine.arc_points);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_kneeboard(&route, &plan)?);
    }

    Ok(())
}
