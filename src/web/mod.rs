pub mod analysis;
pub mod analytics;
pub mod optimize;
pub mod reports;
pub mod visualize;

use crate::state::SharedState;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::services::ServeDir;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": chrono::Utc::now() }))
}

pub fn routes(state: SharedState) -> Router {
    let api = Router::new()
        .merge(analysis::router(state.clone()))
        .merge(optimize::router(state.clone()))
        .merge(visualize::router(state.clone()))
        .merge(reports::router(state.clone()))
        .merge(analytics::router(state.clone()));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .nest_service(
            "/visualizations",
            ServeDir::new(state.config.visualization_dir.clone()),
        )
}
