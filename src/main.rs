//! spmap CLI - Command-line tool for strategy-game world-map files.
//!
//! This is the main entry point for the spmap command-line application.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use spmap::prelude::*;

/// spmap - world-map file inspection and conversion tool
#[derive(Parser)]
#[command(name = "spmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of a map file
    Info {
        /// Path to the map file
        file: PathBuf,
    },

    /// Check that a map file reads cleanly
    Validate {
        /// Path to the map file
        file: PathBuf,

        /// Treat every warning as a failure
        #[arg(short, long)]
        strict: bool,
    },

    /// Rewrite a map file in canonical form
    Normalize {
        /// Input map file
        #[arg(short, long)]
        input: PathBuf,

        /// Output map file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => cmd_info(&file)?,
        Commands::Validate { file, strict } => cmd_validate(&file, strict)?,
        Commands::Normalize { input, output } => cmd_normalize(&input, &output)?,
    }

    Ok(())
}

fn cmd_info(file: &PathBuf) -> Result<()> {
    let start = Instant::now();
    let (map, warnings) = spmap::read_map_file(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    println!("Read {} in {:?}", file.display(), start.elapsed());

    println!(
        "Dimensions: {} rows x {} columns (version {})",
        map.dimensions.rows, map.dimensions.columns, map.dimensions.version
    );
    if map.current_turn >= 0 {
        println!("Current turn: {}", map.current_turn);
    }
    println!("Players: {}", map.players.len());
    for player in map.players.iter() {
        let marker = if map.players.current_id() == Some(player.player_id) {
            " (current)"
        } else {
            ""
        };
        println!("  {:>4}  {}{}", player.player_id, player, marker);
    }
    println!("Tiles with content: {}", map.tiles().count());
    println!(
        "Fixtures: {} ({} off-grid)",
        map.fixture_count(),
        map.elsewhere.len()
    );
    if !warnings.is_empty() {
        println!("Warnings: {}", warnings.len());
        for warning in &warnings {
            println!("  {warning}");
        }
    }
    Ok(())
}

fn cmd_validate(file: &PathBuf, strict: bool) -> Result<()> {
    let warner = if strict {
        Warner::strict()
    } else {
        Warner::permissive()
    };
    let reader = std::io::BufReader::new(
        std::fs::File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    );
    let (_, warnings) =
        read_map(reader, warner).with_context(|| format!("{} is not valid", file.display()))?;
    if warnings.is_empty() {
        println!("{}: OK", file.display());
    } else {
        println!("{}: OK with {} warning(s)", file.display(), warnings.len());
        for warning in &warnings {
            println!("  {warning}");
        }
    }
    Ok(())
}

fn cmd_normalize(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let (map, warnings) = spmap::read_map_file(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    if !warnings.is_empty() {
        eprintln!("{} warning(s) while reading {}", warnings.len(), input.display());
    }
    spmap::write_map_file(output, &map)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}
