use crate::lang::Language;

/// Process configuration, read from the environment once at startup and
/// then immutable for the lifetime of the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub allowed_origins: Vec<String>,
    pub visualization_dir: String,
    pub default_language: Language,
    pub max_text_length: usize,
}

const DEFAULT_MAX_TEXT_LENGTH: usize = 10_000;

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| {
            let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
            let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
            format!("{host}:{port}")
        });

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let visualization_dir =
            std::env::var("VISUALIZATION_DIR").unwrap_or_else(|_| "visualizations".to_string());

        let default_language = std::env::var("DEFAULT_LANGUAGE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Language::Zh);

        let max_text_length = std::env::var("MAX_TEXT_LENGTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_TEXT_LENGTH);

        Self {
            bind_addr,
            allowed_origins,
            visualization_dir,
            default_language,
            max_text_length,
        }
    }

    pub fn allow_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }

    /// Input cap for the analysis endpoints, measured in characters.
    pub fn check_text_length(&self, text: &str) -> Result<(), String> {
        let length = text.chars().count();
        if length > self.max_text_length {
            Err(format!(
                "text is {length} characters, exceeding the {} character limit",
                self.max_text_length
            ))
        } else {
            Ok(())
        }
    }
}
