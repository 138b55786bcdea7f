use super::round2;
use crate::lang::whitespace_token_count;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const DENSITY_LOW_BOUND: f64 = 0.5;
pub const DENSITY_HIGH_BOUND: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityVerdict {
    Low,
    Good,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordAnalysis {
    pub count: usize,
    pub density: f64,
    pub positions: Vec<usize>,
    pub verdict: DensityVerdict,
}

/// Classifies a density percentage against the fixed 0.5% / 3.0% bounds.
/// Both boundary values classify as good.
pub fn classify_density(density_pct: f64) -> DensityVerdict {
    if density_pct < DENSITY_LOW_BOUND {
        DensityVerdict::Low
    } else if density_pct > DENSITY_HIGH_BOUND {
        DensityVerdict::High
    } else {
        DensityVerdict::Good
    }
}

/// Case-insensitive, non-overlapping occurrence scan. Offsets are
/// character offsets into the case-folded content.
fn find_occurrences(content_lower: &[char], keyword_lower: &[char]) -> Vec<usize> {
    if keyword_lower.is_empty() || keyword_lower.len() > content_lower.len() {
        return Vec::new();
    }
    let mut positions = Vec::new();
    let mut i = 0;
    while i + keyword_lower.len() <= content_lower.len() {
        if content_lower[i..i + keyword_lower.len()] == keyword_lower[..] {
            positions.push(i);
            i += keyword_lower.len();
        } else {
            i += 1;
        }
    }
    positions
}

/// Per-keyword usage analysis: literal substring counting, not
/// token-boundary matching, and density over the whitespace token count
/// of the content. Duplicate keywords keep their first entry.
pub fn analyze_keywords(content: &str, keywords: &[String]) -> Vec<(String, KeywordAnalysis)> {
    let content_chars: Vec<char> = content.to_lowercase().chars().collect();
    let token_count = whitespace_token_count(content);

    let mut entries: Vec<(String, KeywordAnalysis)> = Vec::new();
    for keyword in keywords {
        if entries.iter().any(|(k, _)| k == keyword) {
            continue;
        }
        let keyword_chars: Vec<char> = keyword.to_lowercase().chars().collect();
        let positions = find_occurrences(&content_chars, &keyword_chars);
        let count = positions.len();
        let density_pct = if token_count > 0 {
            count as f64 / token_count as f64 * 100.0
        } else {
            0.0
        };
        entries.push((
            keyword.clone(),
            KeywordAnalysis {
                count,
                density: round2(density_pct),
                positions,
                verdict: classify_density(density_pct),
            },
        ));
    }
    entries
}

/// Serializes the order-preserving entry list as a JSON map keyed by
/// keyword, the shape callers expect.
pub fn serialize_keyword_map<S>(
    entries: &[(String, KeywordAnalysis)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (keyword, analysis) in entries {
        map.serialize_entry(keyword, analysis)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(content: &str, keyword: &str) -> KeywordAnalysis {
        analyze_keywords(content, &[keyword.to_string()])
            .pop()
            .unwrap()
            .1
    }

    #[test]
    fn test_boundary_densities_classify_good() {
        assert_eq!(classify_density(0.5), DensityVerdict::Good);
        assert_eq!(classify_density(3.0), DensityVerdict::Good);
        assert_eq!(classify_density(0.49), DensityVerdict::Low);
        assert_eq!(classify_density(3.01), DensityVerdict::High);
    }

    #[test]
    fn test_astro_twice_in_forty_words_is_high() {
        let mut words: Vec<&str> = vec!["filler"; 38];
        words.push("Astro");
        words.push("astro");
        let content = words.join(" ");
        let analysis = single(&content, "Astro");
        assert_eq!(analysis.count, 2);
        assert_eq!(analysis.density, 5.0);
        assert_eq!(analysis.verdict, DensityVerdict::High);
    }

    #[test]
    fn test_case_insensitive_positions() {
        let analysis = single("Rust is fun. rust is fast.", "rust");
        assert_eq!(analysis.count, 2);
        assert_eq!(analysis.positions, vec![0, 13]);
    }

    #[test]
    fn test_empty_content_has_zero_density() {
        let analysis = single("", "rust");
        assert_eq!(analysis.count, 0);
        assert_eq!(analysis.density, 0.0);
        assert_eq!(analysis.verdict, DensityVerdict::Low);
    }

    #[test]
    fn test_substring_semantics_not_token_boundaries() {
        // "cat" matches inside "concatenate"; literal substring counting.
        let analysis = single("concatenate the cat files", "cat");
        assert_eq!(analysis.count, 2);
    }

    #[test]
    fn test_duplicate_keywords_collapse() {
        let entries = analyze_keywords(
            "rust rust rust",
            &["rust".to_string(), "rust".to_string()],
        );
        assert_eq!(entries.len(), 1);
    }
}
