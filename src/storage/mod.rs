//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - pokemon_info(id, name, sprite)
//! - pokemon_types(id, type)
//! - pokemon_abilities(id, ability)

pub mod schema;
pub mod sqlite;

pub use sqlite::{PokedexStore, EntryRow, DbStats};
