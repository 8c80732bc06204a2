//! Recover structured fields from the model's free-form analysis text.
//!
//! The model is asked for a summary, a category and a relevance score, but
//! nothing guarantees the shape of its answer. [`parse`] is therefore a total
//! function: it scans lines for `Category:` / `Relevance:` labels and falls
//! back to an empty category and a zero score, which curation later treats as
//! "exclude".

use crate::models::ParsedAnalysis;

/// Highest relevance score the model is asked to produce.
pub const MAX_RELEVANCE: u8 = 10;

/// Parse one model response into a [`ParsedAnalysis`].
///
/// - `summary`: first non-blank line, trimmed.
/// - `category`: value of the first line mentioning "category" with a colon,
///   trimmed and lowercased.
/// - `relevance`: value of the first line mentioning "relevance" with a colon
///   whose value (before any `/`) is all digits, capped at 10; otherwise 0.
pub fn parse(text: &str) -> ParsedAnalysis {
    let lines: Vec<&str> = text.lines().collect();

    let summary = lines
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string();

    let category = lines
        .iter()
        .find_map(|line| labeled_value(line, "category"))
        .map(|value| value.to_lowercase())
        .unwrap_or_default();

    let relevance = lines
        .iter()
        .filter_map(|line| labeled_value(line, "relevance"))
        .find_map(relevance_score)
        .unwrap_or(0);

    ParsedAnalysis {
        summary,
        category,
        relevance,
    }
}

/// Text between the first and second colon of `line`, trimmed, if `line`
/// mentions `label` (case-insensitive) and contains a colon.
fn labeled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    if !line.to_lowercase().contains(label) {
        return None;
    }
    line.split(':').nth(1).map(str::trim)
}

/// `"7/10"` → 7, `"7"` → 7, `"85"` → 10, anything non-numeric → `None`.
fn relevance_score(value: &str) -> Option<u8> {
    let score = match value.split_once('/') {
        Some((before, _)) => before.trim(),
        None => value,
    };
    if score.is_empty() || !score.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // All digits, so parsing only fails on overflow.
    let score = score.parse::<u64>().unwrap_or(u64::MAX);
    Some(u8::try_from(score.min(u64::from(MAX_RELEVANCE))).unwrap_or(MAX_RELEVANCE))
}
