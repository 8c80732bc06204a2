//! Inclusion policy and ranking for a persona's digest.
//!
//! An article is kept only when the category the model chose is literally one
//! of the persona's category keys and its relevance reaches the threshold.
//! Kept articles are ranked by relevance, highest first, with ties left in
//! the order they were analyzed.

use crate::config::Category;
use crate::models::{CuratedArticle, Digest, ParsedAnalysis, RawArticle};
use tracing::debug;

/// Whether `parsed` qualifies for a persona preferring `categories`.
pub fn is_included(parsed: &ParsedAnalysis, categories: &[Category], threshold: u8) -> bool {
    categories.iter().any(|c| c.key() == parsed.category) && parsed.relevance >= threshold
}

/// Join `article` with `parsed` if it passes [`is_included`].
pub fn curate(
    article: RawArticle,
    parsed: ParsedAnalysis,
    categories: &[Category],
    threshold: u8,
) -> Option<CuratedArticle> {
    if is_included(&parsed, categories, threshold) {
        return Some(CuratedArticle::from_parts(article, parsed));
    }
    // Wording drift ("technology", "tech news") never matches a key and is
    // silently dropped; surface it for debugging.
    if !parsed.category.is_empty() && Category::ALL.iter().all(|c| c.key() != parsed.category) {
        debug!(title = %article.title, category = %parsed.category, "Category outside vocabulary; excluded");
    }
    None
}

/// Order curated articles by relevance, descending. Stable among equal scores.
pub fn rank(mut articles: Vec<CuratedArticle>) -> Digest {
    articles.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    const TECH_SCIENCE: &[Category] = &[Category::Tech, Category::Science];

    fn parsed(category: &str, relevance: u8) -> ParsedAnalysis {
        ParsedAnalysis {
            summary: "summary".to_string(),
            category: category.to_string(),
            relevance,
        }
    }

    fn raw(title: &str) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            summary: "raw".to_string(),
            link: format!("https://example.com/{title}"),
            source: "Feed".to_string(),
        }
    }

    fn curated(title: &str, relevance: u8) -> CuratedArticle {
        CuratedArticle::from_parts(raw(title), parsed("tech", relevance))
    }

    #[test]
    fn test_wrong_category_excluded() {
        assert!(!is_included(&parsed("finance", 9), TECH_SCIENCE, 6));
    }

    #[test]
    fn test_below_threshold_excluded() {
        assert!(!is_included(&parsed("tech", 5), TECH_SCIENCE, 6));
    }

    #[test]
    fn test_at_threshold_included() {
        assert!(is_included(&parsed("tech", 6), TECH_SCIENCE, 6));
        assert!(is_included(&parsed("science", 10), TECH_SCIENCE, 6));
    }

    #[test]
    fn test_empty_category_never_included() {
        assert!(!is_included(&parsed("", 10), TECH_SCIENCE, 0));
    }

    #[test]
    fn test_category_match_is_literal() {
        assert!(!is_included(&parsed("technology", 9), TECH_SCIENCE, 6));
        assert!(!is_included(&parsed("tech news", 9), TECH_SCIENCE, 6));
        assert!(!is_included(&parsed("Tech", 9), TECH_SCIENCE, 6));
    }

    #[test]
    fn test_curate_merges_fields() {
        let article = curate(raw("story"), parsed("science", 7), TECH_SCIENCE, 6).unwrap();
        assert_eq!(article.title, "story");
        assert_eq!(article.analysis, "summary");
        assert_eq!(article.category, "science");
        assert_eq!(article.relevance, 7);
        assert_eq!(article.link, "https://example.com/story");
        assert_eq!(article.source, "Feed");
    }

    #[test]
    fn test_curate_excludes() {
        assert!(curate(raw("story"), parsed("sports", 9), TECH_SCIENCE, 6).is_none());
    }

    #[test]
    fn test_rank_is_stable_descending() {
        let ranked = rank(vec![curated("first", 7), curated("top", 9), curated("second", 7)]);
        let titles: Vec<&str> = ranked.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["top", "first", "second"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(vec![]).is_empty());
    }
}
