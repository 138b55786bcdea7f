use super::round2;
use crate::lang::LanguageAnalyzer;
use serde::Serialize;

/// Sentence boundaries cover both East-Asian and Western terminators.
/// Splitting an empty string yields one empty segment, so sentence_count
/// is never zero for string input.
const SENTENCE_TERMINATORS: [char; 6] = ['。', '！', '？', '.', '!', '?'];

#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityResult {
    pub readability_score: f64,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
    pub word_count: usize,
    pub sentence_count: usize,
}

/// Maps average token length and average sentence length onto a bounded
/// 0-100 score. Shorter sentences and shorter words score higher:
/// `max(0, 30 - avg_sentence_length) * 2 + max(0, 5 - avg_word_length) * 5`.
/// The formula is evaluated literally on degenerate input; empty content
/// scores 85, not 0.
pub fn score_readability(content: &str, segmenter: &dyn LanguageAnalyzer) -> ReadabilityResult {
    let char_count = content.chars().count();
    let word_count = segmenter.tokenize(content).len();
    let sentence_count = content.split(SENTENCE_TERMINATORS).count();

    let avg_word_length = if word_count > 0 {
        char_count as f64 / word_count as f64
    } else {
        0.0
    };
    let avg_sentence_length = if sentence_count > 0 {
        word_count as f64 / sentence_count as f64
    } else {
        0.0
    };

    let score =
        (30.0 - avg_sentence_length).max(0.0) * 2.0 + (5.0 - avg_word_length).max(0.0) * 5.0;

    ReadabilityResult {
        readability_score: score.clamp(0.0, 100.0),
        avg_word_length: round2(avg_word_length),
        avg_sentence_length: round2(avg_sentence_length),
        word_count,
        sentence_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::EnglishAnalyzer;

    #[test]
    fn test_empty_content_scores_85() {
        let result = score_readability("", &EnglishAnalyzer::new());
        assert_eq!(result.word_count, 0);
        assert_eq!(result.sentence_count, 1);
        assert_eq!(result.avg_word_length, 0.0);
        assert_eq!(result.avg_sentence_length, 0.0);
        assert_eq!(result.readability_score, 85.0);
    }

    #[test]
    fn test_score_stays_in_bounds() {
        let segmenter = EnglishAnalyzer::new();
        let samples = [
            "Short. Very short.",
            "One enormous sentence that keeps going and going without any terminator at all and \
             therefore counts as a single extremely long sentence for scoring purposes",
            "中文内容。也有句子！还有问号？",
        ];
        for sample in samples {
            let result = score_readability(sample, &segmenter);
            assert!((0.0..=100.0).contains(&result.readability_score), "{sample}");
        }
    }

    #[test]
    fn test_sentence_split_counts_terminators() {
        let result = score_readability("One. Two! Three?", &EnglishAnalyzer::new());
        // Three terminators leave a trailing empty segment.
        assert_eq!(result.sentence_count, 4);
        assert_eq!(result.word_count, 3);
    }

    #[test]
    fn test_long_sentences_lower_the_score() {
        let segmenter = EnglishAnalyzer::new();
        let terse = score_readability("Cats nap. Dogs run. Fish swim.", &segmenter);
        let rambling = score_readability(
            "the committee subsequently determined notwithstanding considerable deliberation \
             that additional investigation regarding implementation alternatives remained \
             necessary before recommending organizational restructuring proposals",
            &segmenter,
        );
        assert!(terse.readability_score > rambling.readability_score);
    }
}
