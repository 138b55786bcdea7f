mod chinese;
mod english;

pub use chinese::ChineseAnalyzer;
pub use english::EnglishAnalyzer;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_KEYWORD_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" => Ok(Language::Zh),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

/// Coarse polarity result. Which optional fields are present depends on
/// the analyzer that produced it: the lexicon counter reports marker hits,
/// the polarity estimator reports subjectivity.
#[derive(Debug, Clone, Serialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_words_found: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_words_found: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjectivity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Sentiment {
    /// Analyzer-internal failures never propagate; they degrade to an
    /// "unknown" label carrying the failure text.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            label: SentimentLabel::Unknown,
            score: 0.0,
            positive_words_found: None,
            negative_words_found: None,
            subjectivity: None,
            error: Some(message.into()),
        }
    }
}

/// Per-language capabilities: tokenization, sentiment, keyword ranking.
/// One implementation per supported language, selected via the registry.
pub trait LanguageAnalyzer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
    fn score_sentiment(&self, text: &str) -> Sentiment;
    fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<String>;
}

pub struct LanguageRegistry {
    zh: Arc<dyn LanguageAnalyzer>,
    en: Arc<dyn LanguageAnalyzer>,
}

impl LanguageRegistry {
    pub fn with_defaults() -> Self {
        Self {
            zh: Arc::new(ChineseAnalyzer::new()),
            en: Arc::new(EnglishAnalyzer::new()),
        }
    }

    /// Lookup keyed on the language tag; the exhaustive match keeps the
    /// registry total, so there is no missing-entry path.
    pub fn get(&self, language: Language) -> &dyn LanguageAnalyzer {
        match language {
            Language::Zh => self.zh.as_ref(),
            Language::En => self.en.as_ref(),
        }
    }
}

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPECIAL_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s\x{4e00}-\x{9fff}.,!?;:]").unwrap());

/// Cleans raw input ahead of analysis: drops HTML tags, collapses
/// whitespace runs, and blanks characters outside the word / space /
/// CJK / basic-punctuation classes.
pub fn preprocess(text: &str) -> String {
    let text = HTML_TAG_RE.replace_all(text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = SPECIAL_CHARS_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Whitespace token count, the divisor shared by keyword density and the
/// marker-based sentiment score.
pub fn whitespace_token_count(text: &str) -> usize {
    text.split_whitespace().count()
}
