//! Pokédex CLI - fetch the classic catalog and browse it locally

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use pokedex::config::{self, PokedexConfig};
use pokedex::ingest::{IngestJob, DEFAULT_CONCURRENCY};
use pokedex::pokeapi::{PokeApiClient, DEFAULT_API_BASE};
use pokedex::query::QueryEngine;
use pokedex::storage::PokedexStore;
use pokedex::ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(version = "0.1.0")]
#[command(about = "Local Pokédex - pull the original 151 from PokeAPI and browse them offline")]
#[command(long_about = r#"
Pokedex pulls the classic catalog from PokeAPI into a local SQLite
database and serves it to a browser:
  • One-shot ingestion of the original 151 entries
  • Substring search across names and types, exact lookup by id
  • A small JSON API (GET /pokemon?search=...) plus a static web UI

Example usage:
  pokedex populate
  pokedex search pikachu
  pokedex serve --port 3001
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a pokedex.toml with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Fetch the catalog from the remote API into the local database
    Populate {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Base URL of the catalog API
        #[arg(long)]
        api: Option<String>,

        /// Number of entries to fetch
        #[arg(short, long)]
        limit: Option<u32>,

        /// Concurrent detail fetches
        #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Serve the JSON API and the web UI
    Serve {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },

    /// Search the local catalog from the terminal
    Search {
        /// Name substring, exact id, or type substring; omit to list everything
        term: Option<String>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show row counts for the local database
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Init must work even when an existing config file fails to parse.
    let file_config = match &cli.command {
        Commands::Init { .. } => None,
        _ => config::load_config(None)?,
    };
    let file_config = file_config.as_ref();

    match cli.command {
        Commands::Init { force } => {
            let path = config::default_config_path();
            let defaults = PokedexConfig {
                database: Some(config::default_database_path().display().to_string()),
                api_base: Some(DEFAULT_API_BASE.to_string()),
                limit: Some(config::DEFAULT_LIMIT),
            };
            config::write_config(&path, &defaults, force)?;

            ui::success(&format!("Wrote {}", path.display()));
            ui::info("Database", defaults.database.as_deref().unwrap_or_default());
            ui::info("API base", defaults.api_base.as_deref().unwrap_or_default());
            ui::info("Limit", &config::DEFAULT_LIMIT.to_string());
        }

        Commands::Populate {
            database,
            api,
            limit,
            concurrency,
            timeout,
        } => {
            let database = config::resolve_database(database, file_config);
            let api_base = config::resolve_api_base(api, file_config);
            let limit = config::resolve_limit(limit, file_config);

            config::ensure_db_dir(&database)?;

            ui::header("Populating Pokédex");
            ui::status(ui::Icons::DATABASE, "Database", &database.display().to_string());
            ui::status(ui::Icons::PACKAGE, "Entries", &limit.to_string());

            let client = PokeApiClient::new(api_base, Duration::from_secs(timeout))?;
            let mut store = PokedexStore::open(&database)?;

            let report = IngestJob::new(&client)
                .with_concurrency(concurrency)
                .run(&mut store, limit)
                .await?;

            if report.failed > 0 {
                ui::warn(&format!("{} entries failed to download", report.failed));
            }
            if report.skipped > 0 {
                ui::warn(&format!("{} malformed entries were skipped", report.skipped));
            }
            ui::success(&format!(
                "Stored {} Pokémon in {}",
                report.stored,
                database.display()
            ));
            ui::timing(&report.to_string());
        }

        Commands::Serve { database, port } => {
            let database = config::resolve_database(database, file_config);
            config::ensure_db_dir(&database)?;

            pokedex::server::start_server(port, database).await?;
        }

        Commands::Search {
            term,
            database,
            format,
        } => {
            let term = term.unwrap_or_default();
            let database = config::resolve_database(database, file_config);
            let store = PokedexStore::open(&database)?;
            let engine = QueryEngine::new(&store);

            let results = engine.search(&term)?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                ui::status(ui::Icons::SEARCH, "Searching", &term);
                if results.is_empty() {
                    println!("{} No Pokémon found.", ui::Icons::CROSS);
                } else {
                    println!("{}", ui::results_table(&results));
                    println!("{}", ui::dim(&format!("{} result(s)", results.len())));
                }
            }
        }

        Commands::Stats { database } => {
            let database = config::resolve_database(database, file_config);
            let store = PokedexStore::open(&database)?;
            let stats = store.stats()?;

            ui::status(ui::Icons::STATS, "Database", &database.display().to_string());
            println!("{}", ui::stats_table(&stats));
        }
    }

    Ok(())
}
