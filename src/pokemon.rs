//! Pokemon domain record
//!
//! The normalized shape of one catalog entry, independent of both the
//! remote API's JSON layout and the storage schema. Ingestion produces
//! these; storage persists them across three tables.

use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// `types` and `abilities` are semantically sets: the ingestion side
/// de-duplicates them before constructing a `Pokemon`, and the write path
/// clears an entry's child rows before re-inserting, so duplicates cannot
/// accumulate across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Stable identifier from the remote catalog (primary key)
    pub id: i64,
    /// Display name
    pub name: String,
    /// Front sprite URL, absent for entries without artwork
    pub sprite: Option<String>,
    /// Type names (e.g. "grass", "poison")
    pub types: Vec<String>,
    /// Ability names (e.g. "overgrow")
    pub abilities: Vec<String>,
}

impl Pokemon {
    /// Create an entry with no sprite, types, or abilities
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sprite: None,
            types: Vec::new(),
            abilities: Vec::new(),
        }
    }

    /// Set the sprite URL
    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    /// Set the type names
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    /// Set the ability names
    pub fn with_abilities(mut self, abilities: Vec<String>) -> Self {
        self.abilities = abilities;
        self
    }
}
