use tabled::{settings::Style, Table, Tabled};

use crate::query::PokemonSummary;
use crate::storage::DbStats;

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Types")]
    types: String,
    #[tabled(rename = "Abilities")]
    abilities: String,
}

/// Render search hits as a rounded table. Sprites are URLs and stay
/// out of the terminal view.
pub fn results_table(results: &[PokemonSummary]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let rows: Vec<ResultRow> = results
        .iter()
        .map(|hit| ResultRow {
            id: hit.id,
            name: hit.name.clone(),
            types: hit.types.clone(),
            abilities: hit.abilities.clone(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn stats_table(stats: &DbStats) -> String {
    let rows = vec![
        StatRow {
            metric: "Pokémon".into(),
            value: stats.entries.to_string(),
        },
        StatRow {
            metric: "Type rows".into(),
            value: stats.types.to_string(),
        },
        StatRow {
            metric: "Ability rows".into(),
            value: stats.abilities.to_string(),
        },
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_table_renders_rows() {
        let results = vec![PokemonSummary {
            id: 1,
            name: "bulbasaur".into(),
            sprite: String::new(),
            types: "grass,poison".into(),
            abilities: "overgrow".into(),
        }];

        let rendered = results_table(&results);
        assert!(rendered.contains("bulbasaur"));
        assert!(rendered.contains("grass,poison"));

        assert!(results_table(&[]).is_empty());
    }
}
