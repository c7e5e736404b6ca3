use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::storage::PokedexStore;
use crate::Result;

pub mod routes;

/// Server state. Handlers open the store per request, so all the
/// state carries is the path.
pub struct AppState {
    pub database_path: PathBuf,
}

pub async fn start_server(port: u16, database_path: PathBuf) -> Result<()> {
    // Creates the schema on a fresh path before accepting requests.
    PokedexStore::open(&database_path)?;

    let state = Arc::new(AppState { database_path });

    let app = Router::new()
        .route("/pokemon", get(routes::search_pokemon))
        .route("/stats", get(routes::get_stats))
        .fallback_service(ServeDir::new("ui"))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Pokédex server running at http://{}", addr);
    println!("   Search endpoint: http://{}/pokemon?search=pikachu", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
