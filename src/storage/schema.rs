//! Database schema definitions
//!
//! Table and column names are a contract shared by the ingestion job and
//! the query service; both sides read them from here.

/// SQL to create the pokemon_info table
pub const CREATE_INFO_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pokemon_info (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    sprite TEXT
)
"#;

/// SQL to create the pokemon_types table
pub const CREATE_TYPES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pokemon_types (
    id INTEGER NOT NULL REFERENCES pokemon_info(id),
    type TEXT NOT NULL
)
"#;

/// SQL to create the pokemon_abilities table
pub const CREATE_ABILITIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pokemon_abilities (
    id INTEGER NOT NULL REFERENCES pokemon_info(id),
    ability TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_types_id ON pokemon_types(id)",
    "CREATE INDEX IF NOT EXISTS idx_types_type ON pokemon_types(type)",
    "CREATE INDEX IF NOT EXISTS idx_abilities_id ON pokemon_abilities(id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_INFO_TABLE, CREATE_TYPES_TABLE, CREATE_ABILITIES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}

/// Drop statements for a destructive reset, children before parent
pub const DROP_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS pokemon_abilities",
    "DROP TABLE IF EXISTS pokemon_types",
    "DROP TABLE IF EXISTS pokemon_info",
];
