use crate::charts::ChartData;
use crate::error::ApiError;
use crate::state::SharedState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct VisualizationRequest {
    data: ChartData,
    chart_type: String,
    title: String,
}

#[derive(Debug, Serialize)]
struct VisualizationResponse {
    success: bool,
    image_url: String,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/visualization", post(generate_visualization))
        .with_state(state)
}

async fn generate_visualization(
    State(state): State<SharedState>,
    Json(request): Json<VisualizationRequest>,
) -> Result<Json<VisualizationResponse>, ApiError> {
    let filename = state
        .charts
        .render(&request.chart_type, &request.data, &request.title)?;
    tracing::info!("rendered {} chart to {}", request.chart_type, filename);
    Ok(Json(VisualizationResponse {
        success: true,
        image_url: format!("/visualizations/{filename}"),
    }))
}
