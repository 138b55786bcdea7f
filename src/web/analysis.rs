use crate::error::ApiError;
use crate::lang::{preprocess, Language, Sentiment, DEFAULT_KEYWORD_COUNT};
use crate::state::SharedState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct TextAnalysisRequest {
    text: String,
    language: Option<Language>,
}

#[derive(Debug, Serialize)]
struct TextAnalysisResponse {
    success: bool,
    sentiment: Sentiment,
    keywords: Vec<String>,
    language: Language,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/text-analysis", post(text_analysis))
        .with_state(state)
}

async fn text_analysis(
    State(state): State<SharedState>,
    Json(request): Json<TextAnalysisRequest>,
) -> Result<Json<TextAnalysisResponse>, ApiError> {
    state
        .config
        .check_text_length(&request.text)
        .map_err(ApiError::Internal)?;

    let language = request.language.unwrap_or(state.config.default_language);
    let analyzer = state.languages.get(language);
    let text = preprocess(&request.text);

    // Sentiment failures degrade to an "unknown" label instead of failing
    // the whole request; keyword extraction still runs.
    let sentiment =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            analyzer.score_sentiment(&text)
        }))
        .unwrap_or_else(|_| Sentiment::unknown("sentiment analysis failed"));
    let keywords = analyzer.extract_keywords(&text, DEFAULT_KEYWORD_COUNT);

    Ok(Json(TextAnalysisResponse {
        success: true,
        sentiment,
        keywords,
        language,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartRenderer;
    use crate::config::AppConfig;
    use crate::lang::{LanguageRegistry, SentimentLabel};
    use crate::state::AppState;
    use std::sync::Arc;

    fn test_state(max_text_length: usize) -> SharedState {
        Arc::new(AppState {
            config: AppConfig {
                bind_addr: "0.0.0.0:8000".into(),
                allowed_origins: vec!["*".into()],
                visualization_dir: "visualizations".into(),
                default_language: Language::En,
                max_text_length,
            },
            languages: LanguageRegistry::with_defaults(),
            charts: ChartRenderer::new("visualizations"),
        })
    }

    #[tokio::test]
    async fn test_markup_is_cleaned_before_analysis() {
        let request = TextAnalysisRequest {
            text: "<div>happy happy excellent</div> <script>var x;</script>".into(),
            language: Some(Language::En),
        };
        let Json(response) = text_analysis(State(test_state(10_000)), Json(request))
            .await
            .unwrap();
        assert_eq!(response.sentiment.label, SentimentLabel::Positive);
        // Tag names never surface as keywords once markup is stripped.
        assert!(!response.keywords.iter().any(|k| k == "div" || k == "script"));
        assert!(response.keywords.iter().any(|k| k == "happy"));
    }

    #[tokio::test]
    async fn test_oversized_text_is_rejected() {
        let request = TextAnalysisRequest {
            text: "word ".repeat(20),
            language: None,
        };
        let err = text_analysis(State(test_state(50)), Json(request))
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("50 character limit"));
    }
}
