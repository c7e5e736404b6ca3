use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::query::{PokemonSummary, QueryEngine};
use crate::server::AppState;
use crate::storage::{DbStats, PokedexStore};

#[derive(Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /pokemon?search=<term>`
///
/// A missing or empty term returns the whole catalog. Failures come
/// back as `500 {"error": ...}`; an empty result array is not an
/// error, that distinction belongs to the caller.
pub async fn search_pokemon(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PokemonSummary>>, (StatusCode, Json<ErrorResponse>)> {
    let term = params.search.unwrap_or_default();

    let store = PokedexStore::open(&state.database_path)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    let results = QueryEngine::new(&store)
        .search(&term)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(Json(results))
}

/// `GET /stats`
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DbStats>, (StatusCode, Json<ErrorResponse>)> {
    let store = PokedexStore::open(&state.database_path)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    let stats = store
        .stats()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(Json(stats))
}
