//! gesture_probe — classify landmark batches from stdin.
//!
//! Each input line is one capture callback: a JSON array of hands, each hand
//! an array of 21 `{"x":..,"y":..}` objects.  Each output line is the
//! resulting `HandState` as JSON.
//!
//! ```text
//! $ echo '[[{"x":0.5,"y":0.5}, ...]]' | cargo run -p hand_gesture --features cli --bin gesture_probe
//! {"hands":[{"id":0,"position":{"x":0.0,"y":0.0},"gesture":"pinch","pinchDistance":0.0}]}
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use hand_gesture::{ClassifierConfig, HandState, LandmarkBatch};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "gesture_probe", version, about = "Classify hand landmark batches read from stdin")]
struct Cli {
    /// Thumb-tip to index-tip distance that counts as a pinch
    #[arg(long, default_value_t = 0.05)]
    pinch_threshold: f32,

    /// Extra drop below the middle PIP required for thumbs_down
    #[arg(long, default_value_t = 0.05)]
    thumb_margin: f32,

    /// Tip-below-PIP distance required for a finger to count as curled
    #[arg(long, default_value_t = 0.0)]
    curl_margin: f32,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Warnings by default; each `-v` opens one more level.
fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // RUST_LOG, when set, overrides the flag
    env_logger::Builder::new().filter_level(log_level(cli.verbose)).parse_default_env().init();

    let config = ClassifierConfig {
        pinch_threshold: cli.pinch_threshold,
        thumb_margin:    cli.thumb_margin,
        curl_margin:     cli.curl_margin,
    };

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for (n, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let batch: LandmarkBatch = serde_json::from_str(&line)
            .with_context(|| format!("line {}: expected an array of landmark arrays", n + 1))?;
        let state = HandState::classify_batch(&batch, &config);
        log::info!("line {}: {} hand(s)", n + 1, state.len());
        serde_json::to_writer(&mut out, &state)?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_flag_opens_one_level() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(1), LevelFilter::Info);
        assert_eq!(log_level(2), LevelFilter::Debug);
        assert_eq!(log_level(3), LevelFilter::Trace);
        assert_eq!(log_level(9), LevelFilter::Trace);
    }

    #[test]
    fn verbosity_flags_are_counted() {
        let cli = Cli::try_parse_from(["gesture_probe", "-vv"]).unwrap();
        assert_eq!(log_level(cli.verbose), LevelFilter::Debug);
    }
}
