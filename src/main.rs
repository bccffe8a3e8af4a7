//! poolkiller main entry point.
//!
//! Runs a headless simulation of a pool of entities: they are launched,
//! fall, come to rest, play their kill sequence and go back to the pool to
//! be launched again.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --config assets/config.ini --frames 1200
//! ```

use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use poolkiller::game::{build_schedule, run_frames, setup_world};
use poolkiller::resources::simconfig::SimConfig;
use poolkiller::resources::templates::load_templates;

/// Headless object pool simulation
#[derive(Parser)]
#[command(version, about = "Runs pooled entities through their kill lifecycle.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "assets/config.ini")]
    config: PathBuf,

    /// JSON template file. Overrides `[pool] templates` from the config.
    #[arg(long, value_name = "PATH")]
    templates: Option<PathBuf>,

    /// Number of frames to simulate. Overrides `[simulation] frames`.
    #[arg(long)]
    frames: Option<u64>,

    /// RNG seed. Overrides `[simulation] seed`.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective configuration back to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SimConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
        config = SimConfig::with_path(&cli.config);
    }
    if let Some(path) = cli.templates {
        config.templates_path = path;
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let templates = match load_templates(&config.templates_path) {
        Ok(templates) => templates,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut world = setup_world(&config, templates);
    let mut schedule = build_schedule();

    info!(
        "Simulating {} frames with a pool of {}",
        config.frames, config.capacity
    );
    let summary = run_frames(&mut world, &mut schedule, config.frames, config.delta);
    info!(
        "Done after {} frames: built={} activations={} returns={} live={} (dying={}) parked={} timers={}",
        summary.frames,
        summary.built,
        summary.activations,
        summary.returns,
        summary.live,
        summary.dying,
        summary.parked,
        summary.pending_timers
    );
}
