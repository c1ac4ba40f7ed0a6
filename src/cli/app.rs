//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::list;
use super::output::{Output, OutputFormat};
use crate::domain::ItemId;
use crate::storage::{Config, FileStore};
use crate::sync::Orchestrator;

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(author, version, about = "Local-first personal shopping list")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding the stored list
    #[arg(long, global = true, env = "SHOPLIST_STORE")]
    pub store: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, env = "SHOPLIST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the shopping list
    List,

    /// Add an item
    ///
    /// Examples:
    ///   shoplist add Milk --quantity 2 --category Food --price 1.50
    ///   shoplist add Eggs
    Add {
        /// Item name (must not already be on the list)
        name: String,

        /// Quantity (defaults to 1)
        #[arg(long, short, default_value = "")]
        quantity: String,

        /// Category (defaults to Uncategorized)
        #[arg(long, short, default_value = "")]
        category: String,

        /// Unit price (defaults to 0)
        #[arg(long, short, default_value = "")]
        price: String,
    },

    /// Edit the item at a list position; omitted fields keep their value
    Edit {
        /// Position as shown by `list`
        index: usize,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, short)]
        quantity: Option<String>,

        #[arg(long, short)]
        category: Option<String>,

        #[arg(long, short)]
        price: Option<String>,
    },

    /// Remove an item by ID
    Remove {
        /// Item ID
        id: ItemId,
    },

    /// Mark or unmark an item as purchased
    Toggle {
        /// Item ID
        id: ItemId,
    },

    /// Remove the list and session data (logout)
    Clear,
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "shoplist=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.format.unwrap_or_else(|| config.default_format.into()));

    let dir = config
        .store_dir(cli.store.as_deref())
        .context("Failed to locate the shopping list store")?;
    debug!(dir = %dir.display(), "opening store");

    let orchestrator = Orchestrator::new(FileStore::new(dir));

    match cli.command {
        Commands::List => list::show(&orchestrator, &output)?,
        Commands::Add {
            name,
            quantity,
            category,
            price,
        } => list::add(&orchestrator, &output, name, quantity, category, price)?,
        Commands::Edit {
            index,
            name,
            quantity,
            category,
            price,
        } => {
            let changes = list::EditChanges {
                name,
                quantity,
                category,
                price,
            };
            list::edit(&orchestrator, &output, index, changes)?
        }
        Commands::Remove { id } => list::remove(&orchestrator, &output, id)?,
        Commands::Toggle { id } => list::toggle(&orchestrator, &output, id)?,
        Commands::Clear => list::clear(&orchestrator, &output)?,
    }

    debug!("command completed");
    Ok(())
}
