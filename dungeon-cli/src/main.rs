use dungeon_core::{Dungeon, DungeonBuilder, DungeonBuilderConfig, seeded_rng};

use std::{fs::write as write_file, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{Level, event};

#[derive(Parser, Debug)]
#[command(version, about = "Generate a BSP dungeon", long_about = None)]
struct Args {
    /// Number of columns in the map
    #[arg(short, long, default_value_t = 40)]
    columns: u32,

    /// Number of rows in the map
    #[arg(short, long, default_value_t = 40)]
    rows: u32,

    /// Seed for the generator, a random one is picked when missing
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long, default_value_t, value_enum)]
    format: OutputFormat,

    /// Write the map to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log verbosity, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    config: DungeonBuilderConfig,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Ascii,
    Json,
}

#[derive(Serialize)]
struct SeededDungeon<'a> {
    seed: u64,
    #[serde(flatten)]
    dungeon: &'a Dungeon,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let max_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    event!(
        Level::INFO,
        "Generating [{}x{}] dungeon with seed [{}]",
        args.columns,
        args.rows,
        seed
    );

    let builder = DungeonBuilder::new(args.columns, args.rows)
        .and_then(|builder| builder.with_config(args.config))
        .context("Invalid dungeon configuration")?;

    let dungeon = builder.build(&mut seeded_rng(seed));

    event!(
        Level::INFO,
        "Generated [{}] rooms, [{}] corridors, [{}] floor regions",
        dungeon.rooms.len(),
        dungeon.corridors.len(),
        dungeon.grid.floor_regions()
    );

    let rendered = match args.format {
        OutputFormat::Ascii => dungeon.grid.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&SeededDungeon {
            seed,
            dungeon: &dungeon,
        })
        .context("Failed to serialize dungeon")?,
    };

    match args.output {
        Some(path) => {
            write_file(&path, rendered)
                .with_context(|| format!("Failed to write map to {}", path.display()))?;
            event!(Level::INFO, "Saved map to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
