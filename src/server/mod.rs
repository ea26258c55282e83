//! JSON API for the browser front-end.

mod handlers;
mod state;

use axum::Router;
use axum::routing::get;
use state::AppState;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::trips::{JsonFileStore, TripBook};

pub fn build_router(store: JsonFileStore) -> Router {
    let state = Arc::new(AppState {
        book: Mutex::new(TripBook::open(store)),
    });

    Router::new()
        .route("/api/transports", get(handlers::transports))
        .route(
            "/api/trips",
            get(handlers::list_trips)
                .post(handlers::create_trip)
                .delete(handlers::clear_trips),
        )
        .route("/api/statistics", get(handlers::statistics))
        .route("/api/compare", get(handlers::compare))
        .route("/api/routes", get(handlers::route_table))
        .route("/api/routes/distance", get(handlers::route_distance))
        .route("/api/routes/suggest", get(handlers::route_suggestions))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, store: JsonFileStore) -> std::io::Result<()> {
    log::info!("trip history at {}", store.path().display());
    let app = build_router(store);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    eprintln!("  EcoTrip server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await
}
