//! Bazaar CLI - browse and search the product catalog from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the first 8 products
//! bazaar products --limit 8
//!
//! # List categories
//! bazaar categories
//!
//! # Show one product
//! bazaar show 1
//!
//! # One-shot search
//! bazaar search backpack
//!
//! # Search as you type: each stdin line is a new input, debounced
//! bazaar search --interactive
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Catalog API base URL (default: <https://fakestoreapi.com>)
//! - `SEARCH_DEBOUNCE_MS` - Quiescence window for `--interactive` (default: 300)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use bazaar_core::ProductId;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Maximum number of products to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List category names
    Categories,
    /// Show one product
    Show {
        /// Product id
        id: ProductId,
    },
    /// Search the catalog by title, description or category
    Search {
        /// Query to run once
        #[arg(required_unless_present = "interactive")]
        query: Option<String>,

        /// Read successive queries from stdin, debounced
        #[arg(short, long, conflicts_with = "query")]
        interactive: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Products { limit } => commands::catalog::products(limit).await?,
        Commands::Categories => commands::catalog::categories().await?,
        Commands::Show { id } => commands::catalog::show(id).await?,
        Commands::Search { query, interactive } => {
            if interactive {
                commands::search::interactive().await?;
            } else if let Some(query) = query {
                commands::search::once(&query).await?;
            }
        }
    }
    Ok(())
}
