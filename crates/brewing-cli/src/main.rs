//! # Brew
//!
//! Command-line harness for the brewing engine.
//!
//! Loads a brewer configuration (TOML) and pantry data (JSON), then lists
//! recipes, shows compatible ingredients, runs brew attempts, or prints the
//! outcome tables.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;
mod pantry_loader;

use std::path::PathBuf;

use anyhow::{Context, Result};
use brewing_common::Rarity;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::BrewArgs;
use crate::config::BrewConfig;
use crate::pantry_loader::load_pantry;

#[derive(Parser)]
#[command(name = "brew", version, about = "Potion brewing resolution")]
struct Cli {
    /// Configuration file (default: ./brew.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pantry data directory (overrides the configuration)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List recipes, ingredients, and equipment
    List,
    /// Show compatible ingredients for each component of a recipe
    Options {
        /// Recipe id or name
        recipe: String,
        /// Rarity to brew a universal recipe at
        #[arg(long)]
        rarity: Option<Rarity>,
    },
    /// Brew a recipe
    Brew {
        /// Recipe id or name
        recipe: String,
        /// Ingredient for a component, as component=ingredient
        #[arg(long = "select", value_parser = parse_selection)]
        selections: Vec<(String, String)>,
        /// Rarity to brew a universal recipe at
        #[arg(long)]
        rarity: Option<Rarity>,
        /// Spend a nullifier to suppress impurities
        #[arg(long)]
        nullify: bool,
        /// Number of attempts
        #[arg(long, default_value_t = 1)]
        times: u32,
        /// Dice seed (overrides the configuration)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the flaw, excellence, and impurity tables
    Tables {
        /// Rarity to scale impurity effects at
        #[arg(long, default_value = "common")]
        rarity: Rarity,
    },
}

fn parse_selection(raw: &str) -> Result<(String, String), String> {
    let (component, ingredient) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected component=ingredient, got '{raw}'"))?;
    let (component, ingredient) = (component.trim(), ingredient.trim());
    if component.is_empty() || ingredient.is_empty() {
        return Err(format!("expected component=ingredient, got '{raw}'"));
    }
    Ok((component.to_string(), ingredient.to_string()))
}

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("brew=info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BrewConfig::load_from(path),
        None => BrewConfig::load(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let load = || {
        load_pantry(&config.data_dir)
            .with_context(|| format!("Failed to load pantry from {}", config.data_dir.display()))
    };

    match cli.command {
        Command::Tables { rarity } => commands::tables(rarity),
        Command::List => commands::list(&load()?),
        Command::Options { recipe, rarity } => commands::options(&load()?, &recipe, rarity)?,
        Command::Brew {
            recipe,
            selections,
            rarity,
            nullify,
            times,
            seed,
        } => {
            let args = BrewArgs {
                recipe,
                selections,
                rarity,
                nullify,
                times,
                seed,
            };
            commands::brew(&mut load()?, &config, &args)?;
        },
    }

    info!("Done");
    Ok(())
}
