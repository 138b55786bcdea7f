use crate::analysis::optimizer::{optimize_content, OptimizationReport};
use crate::analysis::seo::{build_seo_report, SeoReport};
use crate::error::ApiError;
use crate::state::SharedState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct OptimizationRequest {
    title: String,
    content: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
struct OptimizationResponse {
    success: bool,
    report: OptimizationReport,
}

#[derive(Debug, Serialize)]
struct SeoResponse {
    success: bool,
    report: SeoReport,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/content-optimization", post(content_optimization))
        .route("/seo-report", post(seo_report))
        .with_state(state)
}

async fn content_optimization(
    State(state): State<SharedState>,
    Json(request): Json<OptimizationRequest>,
) -> Result<Json<OptimizationResponse>, ApiError> {
    let segmenter = state.languages.get(state.config.default_language);
    let report = optimize_content(&request.title, &request.content, &request.keywords, segmenter);
    Ok(Json(OptimizationResponse {
        success: true,
        report,
    }))
}

async fn seo_report(
    Json(request): Json<OptimizationRequest>,
) -> Result<Json<SeoResponse>, ApiError> {
    let report = build_seo_report(&request.title, &request.content, &request.keywords);
    Ok(Json(SeoResponse {
        success: true,
        report,
    }))
}
