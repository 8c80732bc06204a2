//! Plain-text rendering for terminal output.

use crate::config::Persona;
use crate::models::CuratedArticle;
use std::fmt::Write;

/// Render a persona heading followed by one block per article.
pub fn digest_to_text(persona: Persona, articles: &[CuratedArticle]) -> String {
    let mut out = String::new();
    writeln!(out, "\n=== Newsletter for {} ===", persona.display_name()).unwrap();

    for article in articles {
        writeln!(out, "\n[{}] {}", article.category.to_uppercase(), article.title).unwrap();
        writeln!(out, "Source: {}", article.source).unwrap();
        writeln!(out, "Relevance Score: {}/10", article.relevance).unwrap();
        writeln!(out, "Analysis: {}", article.analysis).unwrap();
        writeln!(out, "Read more: {}\n", article.link).unwrap();
        writeln!(out, "{}", "-".repeat(80)).unwrap();
    }

    out
}
