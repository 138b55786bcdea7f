use super::{LanguageAnalyzer, Sentiment, SentimentLabel};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Small valence lexicon: word -> (polarity in [-1, 1], subjectivity in [0, 1]).
/// Text polarity is the mean over matched tokens, thresholded at +/-0.1.
static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    [
        ("amazing", (0.8, 0.9)),
        ("awesome", (0.8, 0.9)),
        ("excellent", (0.9, 0.8)),
        ("great", (0.7, 0.7)),
        ("good", (0.6, 0.6)),
        ("wonderful", (0.8, 0.8)),
        ("fantastic", (0.8, 0.9)),
        ("love", (0.7, 0.7)),
        ("like", (0.4, 0.5)),
        ("best", (0.9, 0.6)),
        ("nice", (0.5, 0.7)),
        ("happy", (0.7, 0.8)),
        ("helpful", (0.5, 0.4)),
        ("fast", (0.4, 0.3)),
        ("recommend", (0.5, 0.4)),
        ("perfect", (0.9, 0.9)),
        ("enjoy", (0.6, 0.6)),
        ("impressive", (0.7, 0.8)),
        ("bad", (-0.6, 0.6)),
        ("terrible", (-0.9, 0.9)),
        ("awful", (-0.9, 0.9)),
        ("horrible", (-0.9, 0.9)),
        ("poor", (-0.5, 0.5)),
        ("hate", (-0.8, 0.8)),
        ("dislike", (-0.5, 0.6)),
        ("worst", (-0.9, 0.7)),
        ("disappointing", (-0.7, 0.8)),
        ("disappointed", (-0.7, 0.8)),
        ("broken", (-0.5, 0.4)),
        ("slow", (-0.4, 0.3)),
        ("useless", (-0.8, 0.7)),
        ("annoying", (-0.6, 0.8)),
        ("boring", (-0.6, 0.8)),
        ("sad", (-0.6, 0.8)),
        ("wrong", (-0.5, 0.5)),
        ("buggy", (-0.6, 0.5)),
    ]
    .into_iter()
    .collect()
});

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "are", "was", "were", "with", "that", "this", "these", "those",
        "from", "into", "your", "you", "our", "their", "its", "has", "have", "had", "can",
        "will", "would", "should", "not", "but", "all", "any", "out", "about", "over", "very",
        "really", "here", "there", "when", "what", "which", "how", "who", "why", "his", "her",
        "they", "them", "then", "than", "too", "also", "just", "more", "most", "some",
    ]
    .into_iter()
    .collect()
});

pub struct EnglishAnalyzer;

impl EnglishAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn word_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

impl LanguageAnalyzer for EnglishAnalyzer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        word_tokens(text)
    }

    fn score_sentiment(&self, text: &str) -> Sentiment {
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut matched = 0usize;

        for token in word_tokens(text) {
            if let Some(&(polarity, subjectivity)) = LEXICON.get(token.as_str()) {
                polarity_sum += polarity;
                subjectivity_sum += subjectivity;
                matched += 1;
            }
        }

        let (polarity, subjectivity) = if matched == 0 {
            (0.0, 0.0)
        } else {
            (polarity_sum / matched as f64, subjectivity_sum / matched as f64)
        };

        let label = if polarity > 0.1 {
            SentimentLabel::Positive
        } else if polarity < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        Sentiment {
            label,
            score: polarity,
            positive_words_found: None,
            negative_words_found: None,
            subjectivity: Some(subjectivity),
            error: None,
        }
    }

    fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for token in word_tokens(text) {
            if token.chars().count() < 3 || STOPWORDS.contains(token.as_str()) {
                continue;
            }
            if !counts.contains_key(&token) {
                order.push(token.clone());
            }
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut ranked = order;
        ranked.sort_by_key(|t| std::cmp::Reverse(counts[t]));
        ranked.truncate(top_k);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_polarity() {
        let analyzer = EnglishAnalyzer::new();
        let s = analyzer.score_sentiment("The food is amazing and the service is excellent.");
        assert_eq!(s.label, SentimentLabel::Positive);
        assert!(s.score > 0.1);
        assert!(s.subjectivity.unwrap() > 0.0);
    }

    #[test]
    fn test_negative_polarity() {
        let analyzer = EnglishAnalyzer::new();
        let s = analyzer.score_sentiment("Terrible product, the battery is awful and slow.");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert!(s.score < -0.1);
    }

    #[test]
    fn test_neutral_on_no_matches() {
        let analyzer = EnglishAnalyzer::new();
        let s = analyzer.score_sentiment("The train departs at noon.");
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.score, 0.0);
        assert_eq!(s.subjectivity, Some(0.0));
    }

    #[test]
    fn test_keyword_extraction_ranks_by_frequency() {
        let analyzer = EnglishAnalyzer::new();
        let keywords = analyzer
            .extract_keywords("Astro builds fast sites. Astro ships zero JavaScript by default.", 3);
        assert_eq!(keywords.first().map(String::as_str), Some("astro"));
        assert!(keywords.len() <= 3);
    }
}
