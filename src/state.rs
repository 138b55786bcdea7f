use crate::charts::ChartRenderer;
use crate::config::AppConfig;
use crate::lang::LanguageRegistry;
use std::sync::Arc;

pub struct AppState {
    pub config: AppConfig,
    pub languages: LanguageRegistry,
    pub charts: ChartRenderer,
}

pub type SharedState = Arc<AppState>;
