use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// Content may mix HTML tags and Markdown markers; each counter accepts
// both spellings. Heading prefixes are anchored per line at exact depth.
static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)<h1>|^# ").unwrap());
static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)<h2>|^## ").unwrap());
static H3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)<h3>|^### ").unwrap());
static PARAGRAPH_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)<li>|^- |^\* |^\d+\.").unwrap());
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<img|!\[").unwrap());

#[derive(Debug, Clone, Serialize)]
pub struct StructureResult {
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub paragraph_count: usize,
    pub list_item_count: usize,
    pub image_count: usize,
    pub structure_score: f64,
}

/// Pattern-matching structure check over a content string:
/// `score = min(100, (h2 + h3 + paragraphs + images) * 2)`.
pub fn analyze_structure(content: &str) -> StructureResult {
    let h1_count = H1_RE.find_iter(content).count();
    let h2_count = H2_RE.find_iter(content).count();
    let h3_count = H3_RE.find_iter(content).count();

    let paragraph_count = PARAGRAPH_SPLIT_RE
        .split(content)
        .filter(|p| !p.trim().is_empty())
        .count();

    let list_item_count = LIST_ITEM_RE.find_iter(content).count();
    let image_count = IMAGE_RE.find_iter(content).count();

    let structure_score =
        100.0_f64.min(((h2_count + h3_count + paragraph_count + image_count) * 2) as f64);

    StructureResult {
        h1_count,
        h2_count,
        h3_count,
        paragraph_count,
        list_item_count,
        image_count,
        structure_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_headings_count_at_exact_depth() {
        let content = "# Title\n\n## Section\n\n### Sub\n\n## Another";
        let result = analyze_structure(content);
        assert_eq!(result.h1_count, 1);
        assert_eq!(result.h2_count, 2);
        assert_eq!(result.h3_count, 1);
    }

    #[test]
    fn test_html_headings_and_images() {
        let content = "<h1>Title</h1>\n\n<p>text</p>\n\n<img src=\"a.png\"> and ![alt](b.png)";
        let result = analyze_structure(content);
        assert_eq!(result.h1_count, 1);
        assert_eq!(result.image_count, 2);
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let content = "first block\n\nsecond block\n\n   \n\nthird block";
        let result = analyze_structure(content);
        assert_eq!(result.paragraph_count, 3);
    }

    #[test]
    fn test_list_items() {
        let content = "- one\n* two\n3. three\n<li>four</li>";
        let result = analyze_structure(content);
        assert_eq!(result.list_item_count, 4);
    }

    #[test]
    fn test_score_is_capped_at_100() {
        let content = vec!["paragraph"; 80].join("\n\n");
        let result = analyze_structure(content.as_str());
        assert_eq!(result.paragraph_count, 80);
        assert_eq!(result.structure_score, 100.0);
    }

    #[test]
    fn test_empty_content() {
        let result = analyze_structure("");
        assert_eq!(result.paragraph_count, 0);
        assert_eq!(result.structure_score, 0.0);
    }
}
