//! DeskPet: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HeadlessDesktop     LogEventSink   JsonConfigFile             │
//! │  (Pointer+Present.)  (EventSink)    (ConfigPort)               │
//! │  BuiltinFrames / DirectoryFrames    SeededRandom               │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              PetService (pure logic)                   │    │
//! │  │  FSM · Timers · Animation · Homing                     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler<PetTask> (simulated time, delegate-driven)          │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use deskpet::PetRuntime;
use deskpet::adapters::config_file::JsonConfigFile;
use deskpet::adapters::desktop::HeadlessDesktop;
use deskpet::adapters::frames::{BuiltinFrames, DirectoryFrames};
use deskpet::adapters::log_sink::LogEventSink;
use deskpet::adapters::random::SeededRandom;
use deskpet::animation::AnimationSet;
use deskpet::app::ports::{ConfigError, ConfigPort};
use deskpet::config::PetConfig;
use deskpet::{input, logging};

/// A small companion that wanders along the bottom of the screen
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding any of the default parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder with one sub-folder of frames per animation
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Seed for every random draw, for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many behavior ticks
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Run simulated time as fast as possible instead of in real time
    #[arg(long)]
    fast: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&Path>) -> Result<PetConfig> {
    let Some(path) = path else {
        return Ok(PetConfig::default());
    };
    match JsonConfigFile::new(path).load() {
        Err(ConfigError::NotFound) => {
            warn!("{} not found, using defaults", path.display());
            Ok(PetConfig::default())
        }
        other => other.with_context(|| format!("loading {}", path.display())),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    println!("Initializing your desktop pet...");
    println!("To quit, right-click on the pet (type r) or type q and press enter.");

    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("DeskPet v{} seed={seed}", env!("CARGO_PKG_VERSION"));

    let mut sink = LogEventSink::new();
    let animations = match &args.assets {
        Some(dir) => AnimationSet::load(&mut DirectoryFrames::new(dir), &mut sink),
        None => AnimationSet::load(&mut BuiltinFrames::new(), &mut sink),
    };
    let desktop = HeadlessDesktop::open(&config, seed).context("creating the pet surface")?;
    let tick = u64::from(config.tick_interval_ms);

    let mut pet = PetRuntime::new(
        config,
        animations,
        Box::new(SeededRandom::new(seed)),
        desktop,
        sink,
    );
    let commands = input::spawn_stdin_reader();
    pet.start();

    let epoch = Instant::now();
    loop {
        while let Ok(cmd) = commands.try_recv() {
            pet.handle_command(cmd);
        }
        if pet.is_closed() {
            break;
        }

        if args.fast {
            pet.advance(tick);
        } else {
            pet.run_until(epoch.elapsed().as_millis() as u64);
        }

        if args.ticks.is_some_and(|limit| pet.service().tick_count() >= limit) {
            info!("tick limit reached");
            pet.quit();
            break;
        }

        if !args.fast {
            let now = epoch.elapsed().as_millis() as u64;
            let wait = pet
                .next_due()
                .map_or(tick, |due| due.saturating_sub(now))
                .min(tick);
            std::thread::sleep(Duration::from_millis(wait.max(1)));
        }
    }

    if !pet.desktop().is_released() {
        warn!("surface still held after quit");
    }
    Ok(())
}
