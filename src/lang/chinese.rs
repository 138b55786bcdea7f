use super::{whitespace_token_count, LanguageAnalyzer, Sentiment, SentimentLabel};
use jieba_rs::Jieba;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Marker lists for the lexicon-based polarity check. Each marker counts
/// at most once per text, presence not occurrences.
const POSITIVE_MARKERS: [&str; 10] = [
    "好", "棒", "优秀", "喜欢", "满意", "推荐", "赞", "值得", "惊喜", "开心",
];
const NEGATIVE_MARKERS: [&str; 10] = [
    "差", "糟糕", "失望", "讨厌", "不满", "垃圾", "烂", "坑", "难过", "敷衍",
];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "的", "了", "和", "与", "在", "及", "以及", "我们", "你们", "他们", "这个", "那个",
        "这些", "那些", "一下", "一个", "如何", "怎么", "因为", "所以", "但是", "可以",
        "没有", "就是", "还是", "通过", "进行", "使用", "吗", "呢", "啊", "哦",
    ]
    .into_iter()
    .collect()
});

pub struct ChineseAnalyzer {
    jieba: Jieba,
}

impl ChineseAnalyzer {
    pub fn new() -> Self {
        Self { jieba: Jieba::new() }
    }
}

impl Default for ChineseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for ChineseAnalyzer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, false)
            .into_iter()
            .map(|t| t.to_string())
            .collect()
    }

    fn score_sentiment(&self, text: &str) -> Sentiment {
        let pos_count = POSITIVE_MARKERS.iter().filter(|w| text.contains(**w)).count();
        let neg_count = NEGATIVE_MARKERS.iter().filter(|w| text.contains(**w)).count();

        let tokens = whitespace_token_count(text);
        let ratio = |count: usize| {
            if tokens == 0 {
                0.0
            } else {
                (count as f64 / tokens as f64).min(1.0)
            }
        };

        let (label, score) = match pos_count.cmp(&neg_count) {
            std::cmp::Ordering::Greater => (SentimentLabel::Positive, ratio(pos_count)),
            std::cmp::Ordering::Less => (SentimentLabel::Negative, ratio(neg_count)),
            std::cmp::Ordering::Equal => (SentimentLabel::Neutral, 0.5),
        };

        Sentiment {
            label,
            score,
            positive_words_found: Some(pos_count),
            negative_words_found: Some(neg_count),
            subjectivity: None,
            error: None,
        }
    }

    fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        for token in self.jieba.cut(text, false) {
            if token.chars().count() < 2 || STOPWORDS.contains(token) {
                continue;
            }
            if !token.chars().any(|c| c.is_alphanumeric()) {
                continue;
            }
            if !counts.contains_key(token) {
                order.push(token);
            }
            *counts.entry(token).or_insert(0) += 1;
        }

        // Frequency rank, first occurrence breaking ties.
        let mut ranked: Vec<&str> = order;
        ranked.sort_by_key(|t| std::cmp::Reverse(counts[t]));
        ranked.into_iter().take(top_k).map(|t| t.to_string()).collect()
    }
}
