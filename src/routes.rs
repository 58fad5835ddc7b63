use axum::{
    extract::State,
    routing::{get, post},
    Router,
    Json,
};
use serde_json::{json, Value};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Full application with middleware and state attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn create_routes(state: AppState) -> Router<AppState> {
    let static_dir = Path::new(&state.config.system_config.static_dir);

    Router::new()
        // Front end
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))

        // Generation
        .route("/generate", post(handlers::generate))

        // Metadata
        .route("/api/health", get(health_check))
        .route("/api/options", get(get_options))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_options(State(state): State<AppState>) -> Json<Value> {
    let variant = state.generator.variant();
    let reading_levels: Vec<Value> = variant
        .reading_levels()
        .iter()
        .map(|level| {
            json!({
                "key": level.key(),
                "label": level.label(),
                "description": level.description(),
            })
        })
        .collect();

    Json(json!({
        "variant": variant.name(),
        "reading_levels": reading_levels,
        "includes_story": variant.includes_story(),
        "max_pair_count": state.config.generation_config.max_pair_count,
    }))
}
