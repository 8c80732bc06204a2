//! Markdown rendering of a persona digest.
//!
//! The document opens with a highlights list of the three most relevant
//! stories, then one section per category in the order categories first
//! appear in the ranked digest.

use crate::config::Persona;
use crate::models::CuratedArticle;
use crate::utils::take_chars;
use itertools::Itertools;
use std::fmt::Write;

/// Stories listed under "Today's Highlights".
pub const HIGHLIGHT_COUNT: usize = 3;
/// Characters of analysis quoted per highlight.
pub const HIGHLIGHT_EXCERPT_CHARS: usize = 100;

/// Render `articles` (already ranked) as a Markdown document for `persona`.
pub fn digest_to_markdown(persona: Persona, articles: &[CuratedArticle]) -> String {
    let mut md = String::new();

    writeln!(md, "# AI-Powered News Digest for {}\n", persona.display_name()).unwrap();

    if !articles.is_empty() {
        writeln!(md, "## Today's Highlights\n").unwrap();
        writeln!(md, "*Here are the most important stories selected for you:*\n").unwrap();
        for article in articles.iter().take(HIGHLIGHT_COUNT) {
            writeln!(
                md,
                "- **{}** - {}...",
                article.title,
                take_chars(&article.analysis, HIGHLIGHT_EXCERPT_CHARS)
            )
            .unwrap();
        }
        writeln!(md, "\n---\n").unwrap();
    }

    let categories = articles.iter().map(|a| a.category.as_str()).unique();
    for category in categories {
        writeln!(md, "## {} NEWS\n", category.to_uppercase()).unwrap();

        for article in articles.iter().filter(|a| a.category == category) {
            writeln!(md, "### {}", article.title).unwrap();
            writeln!(
                md,
                "**Source:** {} | **Relevance:** {}/10\n",
                article.source, article.relevance
            )
            .unwrap();
            writeln!(md, "{}\n", article.analysis).unwrap();
            writeln!(md, "[Read full article]({})\n", article.link).unwrap();
            writeln!(md, "---\n").unwrap();
        }
    }

    md
}
