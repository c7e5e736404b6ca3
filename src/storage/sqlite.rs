//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params};
use serde::Serialize;
use crate::Result;
use crate::pokemon::Pokemon;
use super::schema;

/// SQLite-backed storage for the catalog
pub struct PokedexStore {
    conn: Connection,
}

impl PokedexStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema (additive, leaves existing rows alone)
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Drop and recreate all tables.
    ///
    /// Run at the start of a population batch so rows from earlier runs
    /// cannot linger. Legal inside an open transaction, which is how the
    /// ingestion job calls it: readers keep seeing the old rows until the
    /// surrounding commit.
    pub fn reset_tables(&self) -> Result<()> {
        for stmt in schema::DROP_STATEMENTS {
            self.conn.execute(stmt, [])?;
        }
        self.initialize_schema()
    }

    // ========== Entry Operations ==========

    /// Insert or replace an entry together with its type and ability rows.
    ///
    /// Idempotent on its own: the entry's previous child rows are deleted
    /// before the new ones go in, so writing the same entry twice leaves a
    /// single info row and one row per distinct type/ability.
    pub fn upsert_entry(&self, pokemon: &Pokemon) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO pokemon_info (id, name, sprite) VALUES (?1, ?2, ?3)",
            params![pokemon.id, pokemon.name, pokemon.sprite],
        )?;

        self.conn
            .execute("DELETE FROM pokemon_types WHERE id = ?1", [pokemon.id])?;
        self.conn
            .execute("DELETE FROM pokemon_abilities WHERE id = ?1", [pokemon.id])?;

        for type_name in &pokemon.types {
            self.conn.execute(
                "INSERT INTO pokemon_types (id, type) VALUES (?1, ?2)",
                params![pokemon.id, type_name],
            )?;
        }
        for ability in &pokemon.abilities {
            self.conn.execute(
                "INSERT INTO pokemon_abilities (id, ability) VALUES (?1, ?2)",
                params![pokemon.id, ability],
            )?;
        }
        Ok(())
    }

    /// Search entries, returning raw rows with aggregated child columns.
    ///
    /// An entry matches when its name matches `name_like`, its id equals
    /// `id` (never matches when `id` is None), or one of its type values
    /// matches `name_like`. Aggregates are computed over ALL of a matching
    /// entry's child rows, not just the ones that matched, and come back
    /// comma-joined in lexicographic order; rows are ordered by id.
    pub fn search_entries(&self, name_like: &str, id: Option<i64>) -> Result<Vec<EntryRow>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT p.id, p.name, p.sprite,
                   (SELECT GROUP_CONCAT(DISTINCT t.type ORDER BY t.type)
                      FROM pokemon_types t WHERE t.id = p.id) AS types,
                   (SELECT GROUP_CONCAT(DISTINCT a.ability ORDER BY a.ability)
                      FROM pokemon_abilities a WHERE a.id = p.id) AS abilities
            FROM pokemon_info p
            WHERE p.name LIKE ?1
               OR p.id = ?2
               OR EXISTS (SELECT 1 FROM pokemon_types t
                           WHERE t.id = p.id AND t.type LIKE ?1)
            ORDER BY p.id
            "#,
        )?;

        let rows = stmt
            .query_map(params![name_like, id], |row| {
                Ok(EntryRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    sprite: row.get(2)?,
                    types: row.get(3)?,
                    abilities: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Count entry rows
    pub fn count_entries(&self) -> Result<usize> {
        self.count_rows("pokemon_info")
    }

    /// Count type rows
    pub fn count_types(&self) -> Result<usize> {
        self.count_rows("pokemon_types")
    }

    /// Count ability rows
    pub fn count_abilities(&self) -> Result<usize> {
        self.count_rows("pokemon_abilities")
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            entries: self.count_entries()?,
            types: self.count_types()?,
            abilities: self.count_abilities()?,
        })
    }

    // ========== Bulk Operations ==========

    /// Begin a transaction for bulk operations
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit(&mut self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    /// Rollback a transaction
    pub fn rollback(&mut self) -> Result<()> {
        self.conn.execute("ROLLBACK", [])?;
        Ok(())
    }
}

/// One search result row as stored; aggregate columns are NULL when the
/// entry has no child rows
#[derive(Debug, Clone)]
pub struct EntryRow {
    pub id: i64,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Option<String>,
    pub abilities: Option<String>,
}

/// Database statistics
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    pub entries: usize,
    pub types: usize,
    pub abilities: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Entries: {}", self.entries)?;
        writeln!(f, "  Types: {}", self.types)?;
        writeln!(f, "  Abilities: {}", self.abilities)
    }
}
