use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sim::SimConfig;
use tools::{project_point, run_sweep};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless satellite sweep over a marker list")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one sweep and print the status lines and summary
    Sweep {
        /// Marker list: { "values": [ { "lat": .., "lon": .. }, .. ] }
        #[arg(long)]
        markers: PathBuf,

        /// Simulation config JSON; missing fields keep their defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Stop after this many frames even if the sweep is still running
        #[arg(long, default_value_t = 100_000)]
        max_frames: u64,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print where a coordinate lands on the globe
    Project {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Sphere radius; `radius + alt` must be positive
        #[arg(long, default_value_t = 0.6, allow_hyphen_values = true)]
        radius: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        alt: f64,
    },

    /// Print the default simulation config as JSON
    DefaultConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(args: Args) -> Result<(), String> {
    match args.command {
        Command::Sweep {
            markers,
            config,
            max_frames,
            json,
        } => cmd_sweep(markers, config, max_frames, json),
        Command::Project {
            lat,
            lon,
            radius,
            alt,
        } => {
            let p = project_point(lat, lon, radius, alt)?;
            println!("{:.6} {:.6} {:.6}", p.x, p.y, p.z);
            Ok(())
        }
        Command::DefaultConfig => {
            let payload = serde_json::to_string_pretty(&SimConfig::default())
                .map_err(|e| format!("json: {e}"))?;
            println!("{payload}");
            Ok(())
        }
    }
}

fn cmd_sweep(
    markers: PathBuf,
    config: Option<PathBuf>,
    max_frames: u64,
    json: bool,
) -> Result<(), String> {
    let config = match config {
        Some(path) => {
            let text = fs::read_to_string(&path).map_err(|e| format!("read {path:?}: {e}"))?;
            debug!(?path, "loaded config");
            SimConfig::from_json_str(&text).map_err(|e| format!("{path:?}: {e}"))?
        }
        None => SimConfig::default(),
    };

    let payload = fs::read_to_string(&markers).map_err(|e| format!("read {markers:?}: {e}"))?;
    info!(?markers, max_frames, "starting sweep");
    let report = run_sweep(config, &payload, max_frames)?;

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "markers: {} placed, {} rejected",
        report.markers_placed, report.markers_rejected
    );
    for line in &report.statuses {
        println!("{line}");
    }
    if report.summary.is_none() {
        return Err(format!(
            "sweep did not finish within {max_frames} frames ({} markers visited)",
            report.visited
        ));
    }
    Ok(())
}
