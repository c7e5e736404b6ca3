use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::pokeapi::DEFAULT_API_BASE;

/// Entries pulled when no limit is configured: the original 151.
pub const DEFAULT_LIMIT: u32 = 151;

/// On-disk configuration. Every field is optional; command-line flags
/// win over the file, the file wins over built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PokedexConfig {
    pub database: Option<String>,
    pub api_base: Option<String>,
    pub limit: Option<u32>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("pokedex.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("pokemon.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PokedexConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PokedexConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &PokedexConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn resolve_database(flag: Option<PathBuf>, config: Option<&PokedexConfig>) -> PathBuf {
    flag.or_else(|| config.and_then(|c| c.database.as_ref().map(PathBuf::from)))
        .unwrap_or_else(default_database_path)
}

pub fn resolve_api_base(flag: Option<String>, config: Option<&PokedexConfig>) -> String {
    flag.or_else(|| config.and_then(|c| c.api_base.clone()))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

pub fn resolve_limit(flag: Option<u32>, config: Option<&PokedexConfig>) -> u32 {
    flag.or(config.and_then(|c| c.limit)).unwrap_or(DEFAULT_LIMIT)
}
