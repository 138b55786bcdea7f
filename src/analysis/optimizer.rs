use super::keywords::{
    analyze_keywords, serialize_keyword_map, DensityVerdict, KeywordAnalysis,
};
use super::readability::{score_readability, ReadabilityResult};
use super::structure::{analyze_structure, StructureResult};
use crate::lang::LanguageAnalyzer;
use serde::Serialize;

const READABILITY_WEIGHT: f64 = 0.4;
const STRUCTURE_WEIGHT: f64 = 0.3;
const DENSITY_WEIGHT: f64 = 0.3;
const IMPROVEMENT_THRESHOLD: f64 = 70.0;

#[derive(Debug, Serialize)]
pub struct OptimizationReport {
    pub overall_score: u32,
    pub readability: ReadabilityResult,
    #[serde(serialize_with = "serialize_keyword_map")]
    pub keyword_analysis: Vec<(String, KeywordAnalysis)>,
    pub structure: StructureResult,
    pub suggestions: Vec<String>,
    /// Three fixed slots (readability, keywords, structure); non-flagged
    /// slots serialize as null and are filtered by the caller.
    pub improvement_areas: Vec<Option<&'static str>>,
    pub title: String,
    pub word_count: usize,
}

fn verdict_points(verdict: DensityVerdict) -> f64 {
    match verdict {
        DensityVerdict::Good => 20.0,
        DensityVerdict::Low => 5.0,
        DensityVerdict::High => 10.0,
    }
}

/// Weighted 40/30/30 combination of readability, structure, and keyword
/// density, plus threshold-driven suggestions in fixed check order.
pub fn optimize_content(
    title: &str,
    content: &str,
    keywords: &[String],
    segmenter: &dyn LanguageAnalyzer,
) -> OptimizationReport {
    let readability = score_readability(content, segmenter);
    let keyword_analysis = analyze_keywords(content, keywords);
    let structure = analyze_structure(content);

    // Mean of per-keyword points; 0 when no keywords were supplied.
    let density_component = if keyword_analysis.is_empty() {
        0.0
    } else {
        keyword_analysis
            .iter()
            .map(|(_, a)| verdict_points(a.verdict))
            .sum::<f64>()
            / keyword_analysis.len() as f64
    };

    let overall = readability.readability_score * READABILITY_WEIGHT
        + structure.structure_score * STRUCTURE_WEIGHT
        + density_component * DENSITY_WEIGHT;
    let overall_score = overall.round().clamp(0.0, 100.0) as u32;

    let mut suggestions = Vec::new();
    if readability.avg_sentence_length > 25.0 {
        suggestions
            .push("Sentences run long; split them up to improve readability".to_string());
    }
    if readability.avg_word_length > 4.0 {
        suggestions.push("Words run long; consider simpler vocabulary".to_string());
    }
    for (keyword, analysis) in &keyword_analysis {
        match analysis.verdict {
            DensityVerdict::Low => suggestions.push(format!(
                "Keyword '{keyword}' density is too low; use it more often"
            )),
            DensityVerdict::High => suggestions.push(format!(
                "Keyword '{keyword}' density is too high; reduce its usage"
            )),
            DensityVerdict::Good => {}
        }
    }
    if structure.h1_count == 0 {
        suggestions.push("Missing a main heading (H1); add one".to_string());
    }
    if structure.h2_count < 2 {
        suggestions
            .push("Too few subheadings (H2); add more to improve structure".to_string());
    }
    if structure.paragraph_count < 3 {
        suggestions.push("Few paragraphs; break the content into more of them".to_string());
    }
    if structure.image_count == 0 {
        suggestions.push("Consider adding images to enrich the content".to_string());
    }

    let keywords_need_work = keyword_analysis
        .iter()
        .any(|(_, a)| a.verdict != DensityVerdict::Good);
    let improvement_areas = vec![
        (readability.readability_score < IMPROVEMENT_THRESHOLD).then_some("readability"),
        keywords_need_work.then_some("keyword usage"),
        (structure.structure_score < IMPROVEMENT_THRESHOLD).then_some("content structure"),
    ];

    let word_count = readability.word_count;
    OptimizationReport {
        overall_score,
        readability,
        keyword_analysis,
        structure,
        suggestions,
        improvement_areas,
        title: title.to_string(),
        word_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::EnglishAnalyzer;

    #[test]
    fn test_empty_keyword_list_is_guarded() {
        let report = optimize_content("Title", "Some body text.", &[], &EnglishAnalyzer::new());
        assert!(report.keyword_analysis.is_empty());
        assert!(report.overall_score <= 100);
    }

    #[test]
    fn test_overall_score_bounds() {
        let report = optimize_content(
            "Guide",
            "# Guide\n\n## Part one\n\n## Part two\n\nrust is great. ![img](a.png)",
            &["rust".to_string()],
            &EnglishAnalyzer::new(),
        );
        assert!(report.overall_score <= 100);
    }

    #[test]
    fn test_density_component_uses_mean_points() {
        // 50-word content, keyword appears once: density 2.0% -> good -> 20 points.
        let mut words = vec!["filler"; 49];
        words.push("rust");
        let content = words.join(" ");
        let report = optimize_content(
            "t",
            &content,
            &["rust".to_string()],
            &EnglishAnalyzer::new(),
        );
        let (_, analysis) = &report.keyword_analysis[0];
        assert_eq!(analysis.verdict, DensityVerdict::Good);

        let expected = (report.readability.readability_score * 0.4
            + report.structure.structure_score * 0.3
            + 20.0 * 0.3)
            .round() as u32;
        assert_eq!(report.overall_score, expected);
    }

    #[test]
    fn test_suggestions_follow_check_order() {
        // No headings, one paragraph, no images, low-density keyword.
        let report = optimize_content(
            "t",
            "plain text without structure mentioning nothing relevant at all here",
            &["missing".to_string()],
            &EnglishAnalyzer::new(),
        );
        let keyword_idx = report
            .suggestions
            .iter()
            .position(|s| s.contains("'missing'"))
            .unwrap();
        let h1_idx = report
            .suggestions
            .iter()
            .position(|s| s.contains("H1"))
            .unwrap();
        let image_idx = report
            .suggestions
            .iter()
            .position(|s| s.contains("images"))
            .unwrap();
        assert!(keyword_idx < h1_idx);
        assert!(h1_idx < image_idx);
        assert_eq!(image_idx, report.suggestions.len() - 1);
    }

    #[test]
    fn test_improvement_areas_have_three_slots() {
        let report = optimize_content("t", "", &[], &EnglishAnalyzer::new());
        assert_eq!(report.improvement_areas.len(), 3);
        // Empty content: readability 85 (not flagged), no keywords, structure 0.
        assert_eq!(report.improvement_areas[0], None);
        assert_eq!(report.improvement_areas[1], None);
        assert_eq!(report.improvement_areas[2], Some("content structure"));
    }
}
