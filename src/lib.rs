//! # Pokedex - catalog ingestion and search
//!
//! A small catalog browser backend for the first 151 Pokemon.
//!
//! Pokedex provides:
//! - A population job that pulls entries from the PokeAPI and normalizes
//!   them into three related SQLite tables
//! - A query engine that searches entries by name, id, or type and
//!   aggregates each entry's types and abilities into flat lists
//! - An HTTP server exposing the search as `GET /pokemon?search=...`
//! - A CLI wrapping population, serving, and local search

pub mod config;
pub mod ingest;
pub mod pokeapi;
pub mod pokemon;
pub mod query;
pub mod server;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use ingest::{IngestJob, IngestReport};
pub use pokeapi::PokeApiClient;
pub use pokemon::Pokemon;
pub use query::{PokemonSummary, QueryEngine};
pub use storage::PokedexStore;

/// Result type alias for Pokedex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Pokedex operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Catalog API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Catalog API returned status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}
