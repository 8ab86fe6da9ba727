//! leap_particles — interactive entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use leap_particles::app::{run, AppConfig};
use log::LevelFilter;
use particle_field::Rgb;
use point_shapes::ShapeKind;

#[derive(Parser, Debug)]
#[command(name = "leap_particles", version, about = "Gesture-driven particle field")]
struct Cli {
    /// JSON config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of particles
    #[arg(long)]
    particles: Option<usize>,

    /// Starting shape (cloud, sphere, galaxy, heart, ring, dna, torusKnot, pyramid, origin)
    #[arg(long)]
    shape: Option<ShapeKind>,

    /// First gradient colour, #rrggbb
    #[arg(long)]
    color_a: Option<Rgb>,

    /// Second gradient colour, #rrggbb
    #[arg(long)]
    color_b: Option<Rgb>,

    /// Seed for start positions and shape sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors and skip the banner
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Warnings by default; `-q` keeps errors only, each `-v` opens one more level.
fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (_, 0)    => LevelFilter::Warn,
        (_, 1)    => LevelFilter::Info,
        (_, 2)    => LevelFilter::Debug,
        _         => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // RUST_LOG, when set, overrides the flags
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose, cli.quiet))
        .parse_default_env()
        .init();

    let mut cfg = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None       => AppConfig::default(),
    };
    if let Some(n) = cli.particles { cfg.engine.particle_count = n; }
    if let Some(s) = cli.shape     { cfg.engine.shape = s; }
    if let Some(c) = cli.color_a   { cfg.engine.color_a = c; }
    if let Some(c) = cli.color_b   { cfg.engine.color_b = c; }
    if cli.seed.is_some()          { cfg.engine.seed = cli.seed; }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg).context("serialising config")?);
        return Ok(());
    }

    if !cli.quiet {
        println!();
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║        Leap Particles — gesture-driven particle field        ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();

        #[cfg(feature = "leap")]
        println!("  Mode: LeapMotion hardware");
        #[cfg(not(feature = "leap"))]
        println!("  Mode: Mouse + keyboard simulation  (use --features leap for hardware)");
        println!("  Shape: {}   Particles: {}", cfg.engine.shape, cfg.engine.particle_count);
        println!();
    }

    run(cfg).context("leap_particles")?;
    Ok(())
}
