//! Catalog search
//!
//! One operation: take a free-form term and return the matching
//! entries with their type and ability lists flattened to
//! comma-joined strings, the shape the HTTP layer and the CLI both
//! render directly.

use serde::{Deserialize, Serialize};

use crate::storage::{EntryRow, PokedexStore};
use crate::Result;

/// Read-side facade over an open store
pub struct QueryEngine<'a> {
    store: &'a PokedexStore,
}

/// One search hit. Aggregate columns and the sprite come back as
/// plain strings, empty when absent, so consumers never see nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: i64,
    pub name: String,
    pub sprite: String,
    pub types: String,
    pub abilities: String,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a PokedexStore) -> Self {
        Self { store }
    }

    /// Search the catalog.
    ///
    /// A term matches an entry when it is a case-insensitive substring
    /// of the name, the exact numeric id, or a substring of one of the
    /// entry's types. The empty term matches everything. Results are
    /// ordered by id.
    pub fn search(&self, term: &str) -> Result<Vec<PokemonSummary>> {
        let pattern = format!("%{term}%");
        let id = term.trim().parse::<i64>().ok();

        let rows = self.store.search_entries(&pattern, id)?;
        Ok(rows.into_iter().map(PokemonSummary::from).collect())
    }
}

impl From<EntryRow> for PokemonSummary {
    fn from(row: EntryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            sprite: row.sprite.unwrap_or_default(),
            types: row.types.unwrap_or_default(),
            abilities: row.abilities.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::Pokemon;

    fn seeded_store() -> PokedexStore {
        let store = PokedexStore::open_in_memory().unwrap();
        let entries = [
            Pokemon::new(1, "bulbasaur")
                .with_sprite("https://sprites.example/1.png")
                .with_types(vec!["grass".into(), "poison".into()])
                .with_abilities(vec!["overgrow".into(), "chlorophyll".into()]),
            Pokemon::new(4, "charmander")
                .with_types(vec!["fire".into()])
                .with_abilities(vec!["blaze".into()]),
            Pokemon::new(23, "ekans")
                .with_types(vec!["poison".into()])
                .with_abilities(vec!["intimidate".into(), "shed-skin".into()]),
            Pokemon::new(60, "poliwag")
                .with_types(vec!["water".into()])
                .with_abilities(vec!["water-absorb".into(), "damp".into()]),
        ];
        for entry in &entries {
            store.upsert_entry(entry).unwrap();
        }
        store
    }

    #[test]
    fn test_empty_term_returns_everything_ordered_by_id() {
        let store = seeded_store();
        let results = QueryEngine::new(&store).search("").unwrap();
        let ids: Vec<i64> = results.iter().map(|hit| hit.id).collect();
        assert_eq!(ids, vec![1, 4, 23, 60]);
    }

    #[test]
    fn test_name_substring_is_case_insensitive() {
        let store = seeded_store();
        let engine = QueryEngine::new(&store);

        let results = engine.search("SAUR").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "bulbasaur");
    }

    #[test]
    fn test_numeric_term_matches_exact_id() {
        let store = seeded_store();
        let results = QueryEngine::new(&store).search("4").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "charmander");
    }

    #[test]
    fn test_unknown_id_returns_empty() {
        let store = seeded_store();
        assert!(QueryEngine::new(&store).search("99").unwrap().is_empty());
    }

    #[test]
    fn test_type_match_keeps_full_type_list() {
        let store = seeded_store();
        let results = QueryEngine::new(&store).search("grass").unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].types, "grass,poison");
    }

    #[test]
    fn test_term_unions_name_and_type_matches() {
        // "po" is a substring of the name "poliwag" and of the type
        // "poison" carried by bulbasaur and ekans.
        let store = seeded_store();
        let results = QueryEngine::new(&store).search("po").unwrap();
        let ids: Vec<i64> = results.iter().map(|hit| hit.id).collect();
        assert_eq!(ids, vec![1, 23, 60]);
    }

    #[test]
    fn test_aggregates_are_sorted_and_never_null() {
        let store = seeded_store();
        let results = QueryEngine::new(&store).search("1").unwrap();

        assert_eq!(results[0].abilities, "chlorophyll,overgrow");
        // charmander has no sprite; it comes through as "".
        let results = QueryEngine::new(&store).search("charmander").unwrap();
        assert_eq!(results[0].sprite, "");
    }

    #[test]
    fn test_summary_serializes_flat_fields() {
        let summary = PokemonSummary {
            id: 1,
            name: "bulbasaur".into(),
            sprite: String::new(),
            types: "grass,poison".into(),
            abilities: "overgrow".into(),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["types"], "grass,poison");
        assert_eq!(value["sprite"], "");
    }
}
