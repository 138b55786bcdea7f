use crate::analysis::analytics::{summarize_tabular, TabularAnalysis};
use crate::error::ApiError;
use crate::state::SharedState;
use axum::{routing::post, Json, Router};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct AnalyticsResponse {
    success: bool,
    analysis: TabularAnalysis,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/advanced-analytics", post(advanced_analytics))
        .with_state(state)
}

async fn advanced_analytics(
    Json(data): Json<Value>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let analysis = summarize_tabular(&data).map_err(ApiError::Internal)?;
    Ok(Json(AnalyticsResponse {
        success: true,
        analysis,
    }))
}
