#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Wayfield world.
//!
//! Results are written to stdout as JSON. Logs go to stderr and are filtered
//! through `RUST_LOG`.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wayfield_core::{Command, Event, PathPoint, Tuning};
use wayfield_world::{apply, query, World};

#[derive(Debug, Parser)]
#[command(name = "wayfield", version)]
#[command(about = "Generate procedural maps and walk characters across them")]
struct Cli {
    /// TOML file overriding the default tuning.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Generates a map and prints it.
    Generate {
        #[command(flatten)]
        world: WorldArgs,
        /// Indents the JSON output.
        #[arg(long)]
        pretty: bool,
    },
    /// Generates a map, spawns characters and advances them.
    Simulate {
        #[command(flatten)]
        world: WorldArgs,
        /// Number of characters to spawn.
        #[arg(long, default_value_t = 3)]
        characters: u32,
        /// Number of movement ticks to run.
        #[arg(long, default_value_t = 100)]
        ticks: u32,
    },
    /// Generates a map and validates a single position against it.
    Check {
        #[command(flatten)]
        world: WorldArgs,
        /// Horizontal coordinate to check.
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        /// Vertical coordinate to check.
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
}

#[derive(Debug, clap::Args)]
struct WorldArgs {
    /// Horizontal extent of the world.
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Vertical extent of the world.
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Seed for every random draw.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    valid: bool,
    nearest: PathPoint,
}

/// Entry point for the Wayfield command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let tuning = match &cli.config {
        Some(path) => config::load_tuning(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let output = match cli.command {
        Action::Generate { world, pretty } => {
            let (world, _) = generated_world(&world, tuning);
            let map = query::map(&world);
            let rendered = if pretty {
                serde_json::to_string_pretty(map)
            } else {
                serde_json::to_string(map)
            };
            rendered.context("failed to serialize map")?
        }
        Action::Simulate {
            world,
            characters,
            ticks,
        } => {
            let (mut world, mut events) = generated_world(&world, tuning);
            for _ in 0..characters {
                let command = Command::SpawnCharacter {
                    name: None,
                    role: None,
                    color: None,
                };
                apply(&mut world, command, &mut events);
            }
            for _ in 0..ticks {
                apply(&mut world, Command::Tick, &mut events);
            }

            let moves = events
                .iter()
                .filter(|event| matches!(event, Event::CharacterAdvanced { .. }))
                .count();
            info!(characters, ticks, moves, "simulation finished");
            serde_json::to_string(query::characters(&world))
                .context("failed to serialize characters")?
        }
        Action::Check { world, x, y } => {
            let (world, _) = generated_world(&world, tuning);
            let report = CheckReport {
                valid: query::is_valid_position(&world, x, y),
                nearest: query::nearest_path_point(&world, x, y),
            };
            serde_json::to_string(&report).context("failed to serialize check report")?
        }
    };

    println!("{output}");
    Ok(())
}

fn generated_world(args: &WorldArgs, tuning: Tuning) -> (World, Vec<Event>) {
    let mut world = World::with_tuning(args.seed, tuning);
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::GenerateMap {
            width: args.width,
            height: args.height,
        },
        &mut events,
    );
    (world, events)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
