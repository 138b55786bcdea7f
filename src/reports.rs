use serde_json::{json, Value};

/// Canned report payloads for the three supported report kinds. These are
/// fixtures, not computations; an unknown selector yields an error object.
pub fn generate_report(report_type: &str) -> Value {
    match report_type {
        "traffic" => json!({
            "period": "2025-01-01 to 2025-01-31",
            "total_visits": 24589,
            "unique_visitors": 18234,
            "page_views": 42105,
            "bounce_rate": 0.42,
            "avg_session_duration": "3m 24s",
            "top_pages": [
                { "page": "/blog/astro-guide", "views": 1240 },
                { "page": "/blog/typescript-tips", "views": 982 },
                { "page": "/blog/tailwind-practice", "views": 876 }
            ],
            "traffic_sources": [
                { "source": "直接访问", "percentage": 45.2 },
                { "source": "搜索引擎", "percentage": 27.7 },
                { "source": "社交媒体", "percentage": 16.3 }
            ]
        }),
        "content" => json!({
            "period": "2025-01-01 to 2025-01-31",
            "total_posts": 42,
            "published_posts": 38,
            "draft_posts": 4,
            "avg_reading_time": "5m 32s",
            "top_categories": [
                { "category": "开发", "count": 18 },
                { "category": "生活", "count": 12 },
                { "category": "技术", "count": 8 }
            ],
            "engagement_metrics": {
                "total_comments": 324,
                "avg_comments_per_post": 7.7,
                "social_shares": 128
            }
        }),
        "seo" => json!({
            "period": "2025-01-01 to 2025-01-31",
            "organic_traffic": 10856,
            "impressions": 45210,
            "click_through_rate": 0.24,
            "top_keywords": [
                { "keyword": "Astro", "impressions": 2450, "clicks": 124 },
                { "keyword": "TypeScript", "impressions": 1980, "clicks": 98 },
                { "keyword": "前端开发", "impressions": 1750, "clicks": 87 }
            ],
            "indexed_pages": 128,
            "technical_issues": {
                "pages_with_errors": 3,
                "missing_alt_tags": 12,
                "slow_pages": 5
            }
        }),
        other => json!({ "error": format!("Unknown report type: {other}") }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_fixture_values() {
        let report = generate_report("traffic");
        assert_eq!(report["total_visits"], 24589);
        assert_eq!(report["top_pages"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_all_known_kinds_have_period() {
        for kind in ["traffic", "content", "seo"] {
            let report = generate_report(kind);
            assert_eq!(report["period"], "2025-01-01 to 2025-01-31", "{kind}");
            assert!(report.get("error").is_none());
        }
    }

    #[test]
    fn test_unknown_kind_yields_error_object() {
        let report = generate_report("revenue");
        assert_eq!(report["error"], "Unknown report type: revenue");
    }
}
