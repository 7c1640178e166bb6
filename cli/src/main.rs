mod commands;
mod config;
mod openfoodfacts;
mod staging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{
    cmd_clear, cmd_delete, cmd_history, cmd_log, cmd_presets, cmd_quick, cmd_save, cmd_search,
    cmd_staged, cmd_summary,
};
use crate::config::{Config, DEFAULT_GOAL};
use crate::openfoodfacts::OpenFoodFactsClient;
use diario_core::LedgerStore;

#[derive(Parser)]
#[command(
    name = "diario",
    version,
    about = "A simple nutrition diary CLI",
    long_about = "\n\n  ██████╗ ██╗ █████╗ ██████╗ ██╗ ██████╗
  ██╔══██╗██║██╔══██╗██╔══██╗██║██╔═══██╗
  ██║  ██║██║███████║██████╔╝██║██║   ██║
  ██║  ██║██║██╔══██║██╔══██╗██║██║   ██║
  ██████╔╝██║██║  ██║██║  ██║██║╚██████╔╝
  ╚═════╝ ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚═╝ ╚═════╝
        your plate, on the record.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a food entry directly with explicit macros
    Log {
        /// Entry name
        name: String,
        /// Calories (kcal)
        calories: f64,
        /// Protein in grams
        #[arg(short, long, default_value = "0")]
        protein: f64,
        /// Carbs in grams
        #[arg(short, long, default_value = "0")]
        carbs: f64,
        /// Fat in grams
        #[arg(short, long, default_value = "0")]
        fat: f64,
        /// Date to log for (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stage a built-in staple times a quantity (see `presets`)
    Quick {
        /// Staple name (case-insensitive, unique prefix ok)
        preset: String,
        /// Quantity multiplier
        #[arg(short, long, default_value = "1.0")]
        qty: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search the `OpenFoodFacts` database; optionally stage a result
    Search {
        /// Search query (brand or product)
        query: String,
        /// Stage result number N from the list
        #[arg(long, value_name = "N")]
        import: Option<usize>,
        /// Portion multiplier against per-100g values (with --import)
        #[arg(long, default_value = "1.0")]
        portion: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save the staged import to the diary
    Save {
        /// Date to log for (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the pending staged import
    Staged {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show daily totals and goal progress (defaults to today)
    Summary {
        /// Date to show (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
        /// Daily calorie goal for this invocation
        #[arg(long, default_value_t = DEFAULT_GOAL)]
        goal: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show per-date macro rollups and the full log
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry by ID
    Delete {
        /// Entry ID to delete (shown in summary/history)
        id: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all entries and remove the diary file
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List the built-in quick-add staples
    Presets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = LedgerStore::open(&config.ledger_path);
    let mut ledger = store.load().context("Could not load the diary")?;

    match cli.command {
        Commands::Log {
            name,
            calories,
            protein,
            carbs,
            fat,
            date,
            json,
        } => cmd_log(
            &store,
            &mut ledger,
            &name,
            calories,
            protein,
            carbs,
            fat,
            date,
            json,
        ),
        Commands::Quick { preset, qty, json } => {
            cmd_quick(&config.staged_path, &preset, qty, json)
        }
        Commands::Search {
            query,
            import,
            portion,
            json,
        } => {
            let off = OpenFoodFactsClient::new();
            cmd_search(&off, &config.staged_path, &query, import, portion, json).await
        }
        Commands::Save { date, json } => {
            cmd_save(&store, &mut ledger, &config.staged_path, date, json)
        }
        Commands::Staged { json } => cmd_staged(&config.staged_path, json),
        Commands::Summary { date, goal, json } => cmd_summary(&ledger, date, goal, json),
        Commands::History { json } => cmd_history(&ledger, json),
        Commands::Delete { id, json } => cmd_delete(&store, &mut ledger, id, json),
        Commands::Clear { yes } => cmd_clear(&store, &mut ledger, yes),
        Commands::Presets { json } => cmd_presets(json),
    }
}
