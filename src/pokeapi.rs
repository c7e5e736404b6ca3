//! PokeAPI client
//!
//! Read-only client for the public catalog API. Two endpoints are
//! consumed: the index (`/pokemon?limit=N`), which hands out `{name, url}`
//! references, and the per-entry detail record behind each reference.
//! Detail JSON is decoded into a minimal DTO and normalized into a
//! [`Pokemon`] here, so nothing API-shaped leaks past this module.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::pokemon::Pokemon;
use crate::{Error, Result};

/// Public catalog API base used when none is configured
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Client for the remote catalog API
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Build a client for `base_url` with a per-request timeout.
    ///
    /// The timeout covers the whole request; a fetch that exceeds it is
    /// reported as a failed item, never an unbounded wait.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// List the first `limit` entry references from the catalog index
    pub async fn list(&self, limit: u32) -> Result<Vec<EntryRef>> {
        let url = format!("{}/pokemon?limit={}", self.base_url, limit);
        let page: EntryPage = self.get_json(&url).await?;
        Ok(page.results)
    }

    /// Fetch and normalize one entry's detail record
    pub async fn fetch(&self, url: &str) -> Result<Pokemon> {
        let detail: PokemonDetail = self.get_json(url).await?;
        detail.into_pokemon()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// One `{name, url}` reference from the index endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRef {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct EntryPage {
    results: Vec<EntryRef>,
}

// Detail DTOs: only the fields we store. Everything else in the (large)
// detail record is ignored by serde.

#[derive(Debug, Deserialize)]
struct PokemonDetail {
    id: i64,
    name: String,
    #[serde(default)]
    sprites: Sprites,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

impl PokemonDetail {
    /// Normalize into the domain record: reject malformed entries and
    /// de-duplicate type/ability names, keeping the API's order
    fn into_pokemon(self) -> Result<Pokemon> {
        if self.id <= 0 {
            return Err(Error::InvalidEntry(format!("non-positive id {}", self.id)));
        }
        if self.name.is_empty() {
            return Err(Error::InvalidEntry(format!("entry {} has an empty name", self.id)));
        }

        let types = dedup_names(self.types.into_iter().map(|slot| slot.type_.name));
        let abilities = dedup_names(self.abilities.into_iter().map(|slot| slot.ability.name));

        Ok(Pokemon {
            id: self.id,
            name: self.name,
            sprite: self.sprites.front_default,
            types,
            abilities,
        })
    }
}

fn dedup_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names.filter(|name| seen.insert(name.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    const BULBASAUR_DETAIL: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "base_experience": 64,
        "height": 7,
        "weight": 69,
        "sprites": {
            "front_default": "https://sprites.example/1.png",
            "back_default": null
        },
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": "https://api.example/type/12/"}},
            {"slot": 2, "type": {"name": "poison", "url": "https://api.example/type/4/"}}
        ],
        "abilities": [
            {"slot": 1, "is_hidden": false,
             "ability": {"name": "overgrow", "url": "https://api.example/ability/65/"}},
            {"slot": 3, "is_hidden": true,
             "ability": {"name": "chlorophyll", "url": "https://api.example/ability/34/"}}
        ]
    }"#;

    #[test]
    fn test_detail_decodes_and_normalizes() {
        let detail: PokemonDetail = serde_json::from_str(BULBASAUR_DETAIL).unwrap();
        let pokemon = detail.into_pokemon().unwrap();

        assert_eq!(pokemon.id, 1);
        assert_eq!(pokemon.name, "bulbasaur");
        assert_eq!(pokemon.sprite.as_deref(), Some("https://sprites.example/1.png"));
        assert_eq!(pokemon.types, vec!["grass", "poison"]);
        assert_eq!(pokemon.abilities, vec!["overgrow", "chlorophyll"]);
    }

    #[test]
    fn test_detail_tolerates_null_sprite_and_duplicates() {
        let detail: PokemonDetail = serde_json::from_str(
            r#"{
                "id": 132,
                "name": "ditto",
                "sprites": {"front_default": null},
                "types": [
                    {"type": {"name": "normal", "url": ""}},
                    {"type": {"name": "normal", "url": ""}}
                ],
                "abilities": []
            }"#,
        )
        .unwrap();
        let pokemon = detail.into_pokemon().unwrap();

        assert!(pokemon.sprite.is_none());
        assert_eq!(pokemon.types, vec!["normal"]);
        assert!(pokemon.abilities.is_empty());
    }

    #[test]
    fn test_detail_rejects_empty_name() {
        let detail: PokemonDetail =
            serde_json::from_str(r#"{"id": 7, "name": ""}"#).unwrap();
        assert!(matches!(
            detail.into_pokemon(),
            Err(Error::InvalidEntry(_))
        ));
    }

    #[tokio::test]
    async fn test_list_and_fetch_against_mock_server() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/pokemon").query_param("limit", "2");
            then.status(200).json_body(json!({
                "count": 1302,
                "results": [
                    {"name": "bulbasaur", "url": server.url("/pokemon/1/")},
                    {"name": "ivysaur", "url": server.url("/pokemon/2/")}
                ]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/pokemon/1/");
            then.status(200)
                .header("content-type", "application/json")
                .body(BULBASAUR_DETAIL);
        });

        let client =
            PokeApiClient::new(server.base_url(), Duration::from_secs(5)).unwrap();

        let refs = client.list(2).await.unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "bulbasaur");

        let pokemon = client.fetch(&refs[0].url).await.unwrap();
        assert_eq!(pokemon.id, 1);
        assert_eq!(pokemon.types, vec!["grass", "poison"]);
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pokemon/3/");
            then.status(200)
                .delay(Duration::from_secs(5))
                .json_body(json!({"id": 3, "name": "venusaur"}));
        });

        let client =
            PokeApiClient::new(server.base_url(), Duration::from_millis(250)).unwrap();
        let err = client.fetch(&server.url("/pokemon/3/")).await.unwrap_err();

        assert!(matches!(err, Error::Api(_)));
    }

    #[tokio::test]
    async fn test_fetch_maps_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pokemon/9999/");
            then.status(404);
        });

        let client =
            PokeApiClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
        let err = client
            .fetch(&server.url("/pokemon/9999/"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnexpectedStatus { status: 404, .. }));
    }
}
