//! Touchless media controller - hand gestures to media keys.
//!
//! Reads hand-landmark frames produced by an external detector, interprets
//! them as gestures, and presses the matching media keys.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use touchless_controller::config::GestureConfig;
use touchless_controller::media::{CommandDispatcher, KeySink, LogSink};
use touchless_controller::replay::{drive, FrameReader};

#[derive(Parser, Debug)]
#[command(name = "touchless-controller", about = "Touchless gesture media controller")]
struct Cli {
    /// TOML file with gesture thresholds and timings
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON-lines landmark frames (default: stdin)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Log key presses instead of injecting them
    #[arg(long)]
    dry_run: bool,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("touchless-controller {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "touchless_controller=info".into()),
        )
        .init();

    info!("touchless-controller v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => {
            let config = GestureConfig::load(path)?;
            info!("config: {}", path.display());
            config
        }
        None => GestureConfig::default(),
    };
    debug!("{:?}", config);

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut dispatcher = CommandDispatcher::new(make_sink(cli.dry_run)?);
    let report = drive(&config, FrameReader::new(reader), &mut dispatcher)?;
    info!(
        "processed {} frames ({} dropped, {} rejected)",
        report.accepted, report.dropped, report.rejected
    );
    Ok(())
}

#[cfg(feature = "media-keys")]
fn make_sink(dry_run: bool) -> anyhow::Result<Box<dyn KeySink>> {
    if dry_run {
        return Ok(Box::new(LogSink::new()));
    }
    Ok(Box::new(touchless_controller::media::EnigoSink::new()?))
}

#[cfg(not(feature = "media-keys"))]
fn make_sink(dry_run: bool) -> anyhow::Result<Box<dyn KeySink>> {
    if !dry_run {
        info!("compiled without 'media-keys' feature, key presses are only logged");
    }
    Ok(Box::new(LogSink::new()))
}
