//! Data models for feed entries and their analyzed, curated representations.
//!
//! This module defines the records that flow through the digest pipeline:
//! - [`RawArticle`]: one feed entry as pulled from an RSS/Atom feed
//! - [`ParsedAnalysis`]: the structured fields recovered from the LLM's free text
//! - [`CuratedArticle`]: a raw article joined with its analysis, kept by curation
//! - [`DigestReport`]: the ranked digest for one persona plus per-item outcomes

use crate::config::Persona;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A feed entry before it is sent to the LLM.
///
/// `summary` may have been HTML in the feed; the feed adapter reduces it to
/// plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    /// The entry headline.
    pub title: String,
    /// The excerpt or description carried by the feed.
    pub summary: String,
    /// Link to the full article.
    pub link: String,
    /// Display name of the feed the entry came from.
    pub source: String,
}

/// Structured fields extracted from one LLM response.
///
/// `category` is lowercased but never normalized against the category
/// vocabulary. `relevance` is always within `0..=10`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAnalysis {
    pub summary: String,
    pub category: String,
    pub relevance: u8,
}

impl ParsedAnalysis {
    /// Stand-in used when the model call fails: the article's own summary,
    /// no category and a zero score, so curation always drops it.
    pub fn degraded(article: &RawArticle) -> Self {
        Self {
            summary: article.summary.clone(),
            category: String::new(),
            relevance: 0,
        }
    }
}

/// An article that passed curation for a persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuratedArticle {
    pub title: String,
    /// The summary line produced by the model.
    pub analysis: String,
    pub category: String,
    pub relevance: u8,
    pub link: String,
    pub source: String,
}

impl CuratedArticle {
    /// Join a raw article's identity fields with its parsed analysis.
    pub fn from_parts(article: RawArticle, parsed: ParsedAnalysis) -> Self {
        Self {
            title: article.title,
            analysis: parsed.summary,
            category: parsed.category,
            relevance: parsed.relevance,
            link: article.link,
            source: article.source,
        }
    }
}

/// Ranked curated articles, highest relevance first.
pub type Digest = Vec<CuratedArticle>;

/// Result of pulling a single feed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    Fetched { url: String, articles: usize },
    Failed { url: String, error: String },
}

impl FeedOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FeedOutcome::Failed { .. })
    }
}

/// Result of sending a single article to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Analyzed { title: String },
    Degraded { title: String, error: String },
}

impl AnalysisOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, AnalysisOutcome::Degraded { .. })
    }
}

/// Everything a single digest generation produced.
#[derive(Debug, Clone, Serialize)]
pub struct DigestReport {
    pub persona: Persona,
    pub generated_at: DateTime<Utc>,
    pub threshold: u8,
    pub articles: Digest,
    /// One entry per feed URL, in fetch order. Logged, not rendered.
    #[serde(skip)]
    pub feeds: Vec<FeedOutcome>,
    /// One entry per article sent to the model, in analysis order.
    #[serde(skip)]
    pub analyses: Vec<AnalysisOutcome>,
}

impl DigestReport {
    pub fn failed_feeds(&self) -> usize {
        self.feeds.iter().filter(|o| o.is_failure()).count()
    }

    pub fn degraded_analyses(&self) -> usize {
        self.analyses.iter().filter(|o| o.is_failure()).count()
    }
}
