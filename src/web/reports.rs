use crate::reports::generate_report;
use crate::state::SharedState;
use axum::{
    extract::Path,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct ReportResponse {
    success: bool,
    report_type: String,
    data: Value,
    generated_at: String,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/report/:report_type", get(report))
        .with_state(state)
}

async fn report(Path(report_type): Path<String>) -> Json<ReportResponse> {
    let data = generate_report(&report_type);
    Json(ReportResponse {
        success: true,
        report_type,
        data,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}
