use super::keywords::{analyze_keywords, serialize_keyword_map, KeywordAnalysis};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SLUG_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthVerdict {
    Good,
    Short,
    Long,
}

#[derive(Debug, Serialize)]
pub struct TitleAnalysis {
    pub length: usize,
    pub status: LengthVerdict,
    pub keywords_in_title: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentAnalysis {
    pub length: usize,
    pub status: LengthVerdict,
}

#[derive(Debug, Serialize)]
pub struct MetaDescriptionAnalysis {
    pub length: usize,
    pub status: LengthVerdict,
    pub suggestion: String,
}

#[derive(Debug, Serialize)]
pub struct UrlAnalysis {
    pub slug: String,
    pub length: usize,
    pub status: LengthVerdict,
}

#[derive(Debug, Serialize)]
pub struct SeoReport {
    pub title_analysis: TitleAnalysis,
    pub content_analysis: ContentAnalysis,
    pub meta_description_analysis: MetaDescriptionAnalysis,
    pub url_analysis: UrlAnalysis,
    #[serde(serialize_with = "serialize_keyword_map")]
    pub keyword_analysis: Vec<(String, KeywordAnalysis)>,
    pub seo_score: u32,
}

/// URL-safe slug: lowercase, spaces to hyphens, everything outside
/// word/space/hyphen classes stripped, leading/trailing hyphens trimmed.
pub fn slugify(title: &str) -> String {
    let hyphenated = title.to_lowercase().replace(' ', "-");
    SLUG_STRIP_RE
        .replace_all(&hyphenated, "")
        .trim_matches('-')
        .to_string()
}

fn classify_range(length: usize, min: usize, max: usize) -> LengthVerdict {
    if length < min {
        LengthVerdict::Short
    } else if length > max {
        LengthVerdict::Long
    } else {
        LengthVerdict::Good
    }
}

fn seo_score(
    title: LengthVerdict,
    content: LengthVerdict,
    meta: LengthVerdict,
    url: LengthVerdict,
    title_keyword_count: usize,
) -> u32 {
    let mut score = match title {
        LengthVerdict::Good => 25,
        LengthVerdict::Short => 15,
        LengthVerdict::Long => 10,
    };
    score += if content == LengthVerdict::Good { 25 } else { 10 };
    score += if meta == LengthVerdict::Good { 20 } else { 10 };
    score += if url == LengthVerdict::Good { 15 } else { 5 };
    score += (title_keyword_count as u32 * 5).min(15);
    score.min(100)
}

/// Independent per-field SEO verdicts summed into a weighted 0-100 score.
/// All lengths are character counts.
pub fn build_seo_report(title: &str, content: &str, keywords: &[String]) -> SeoReport {
    let title_length = title.chars().count();
    let title_status = classify_range(title_length, 10, 60);

    let content_length = content.chars().count();
    let content_status = if content_length >= 300 {
        LengthVerdict::Good
    } else {
        LengthVerdict::Short
    };

    let title_lower = title.to_lowercase();
    let keywords_in_title: Vec<String> = keywords
        .iter()
        .filter(|k| title_lower.contains(&k.to_lowercase()))
        .cloned()
        .collect();

    // The leading slice of the content stands in for a meta description.
    let meta_description = if content_length > 150 {
        let head: String = content.chars().take(150).collect();
        format!("{head}...")
    } else {
        content.to_string()
    };
    let meta_length = meta_description.chars().count();
    let meta_status = classify_range(meta_length, 50, 160);

    let slug = slugify(title);
    let slug_length = slug.chars().count();
    let url_status = classify_range(slug_length, 3, 50);

    let score = seo_score(
        title_status,
        content_status,
        meta_status,
        url_status,
        keywords_in_title.len(),
    );

    SeoReport {
        title_analysis: TitleAnalysis {
            length: title_length,
            status: title_status,
            keywords_in_title,
        },
        content_analysis: ContentAnalysis {
            length: content_length,
            status: content_status,
        },
        meta_description_analysis: MetaDescriptionAnalysis {
            length: meta_length,
            status: meta_status,
            suggestion: meta_description,
        },
        url_analysis: UrlAnalysis {
            slug,
            length: slug_length,
            status: url_status,
        },
        keyword_analysis: analyze_keywords(content, keywords),
        seo_score: score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_65_char_title_is_long_and_scores_10() {
        let title = "x".repeat(65);
        assert_eq!(classify_range(title.chars().count(), 10, 60), LengthVerdict::Long);
        // Long title contributes 10; everything else at its minimum.
        let report = build_seo_report(&title, "", &[]);
        assert_eq!(report.title_analysis.status, LengthVerdict::Long);
        // 65-char slug is long too: title 10, content 10, meta 10, url 5.
        assert_eq!(report.seo_score, 10 + 10 + 10 + 5);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust & Axum: A Guide!  "), "rust--axum-a-guide");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_meta_description_truncates_at_150_chars() {
        let content = "a".repeat(200);
        let report = build_seo_report("A reasonable title", &content, &[]);
        assert_eq!(report.meta_description_analysis.length, 153);
        assert!(report.meta_description_analysis.suggestion.ends_with("..."));
        assert_eq!(report.meta_description_analysis.status, LengthVerdict::Good);
    }

    #[test]
    fn test_keywords_in_title_case_insensitive() {
        let report = build_seo_report(
            "The Complete Astro Guide",
            &"words ".repeat(60),
            &["astro".to_string(), "vue".to_string()],
        );
        assert_eq!(report.title_analysis.keywords_in_title, vec!["astro"]);
    }

    #[test]
    fn test_title_keyword_points_cap_at_15() {
        let content = "c".repeat(300);
        let keywords: Vec<String> =
            ["alpha", "beta", "gamma", "delta"].iter().map(|s| s.to_string()).collect();
        let report = build_seo_report("alpha beta gamma delta", &content, &keywords);
        // good title (22), good content, meta good (153), url good, capped keywords
        assert_eq!(report.seo_score, 25 + 25 + 20 + 15 + 15);
    }

    #[test]
    fn test_score_never_exceeds_100() {
        let content = format!("{} astro", "word ".repeat(300));
        let report = build_seo_report(
            "Astro static site generator guide",
            &content,
            &["astro".to_string(), "guide".to_string(), "static".to_string(), "site".to_string()],
        );
        assert!(report.seo_score <= 100);
    }
}
