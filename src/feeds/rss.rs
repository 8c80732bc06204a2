//! Feed document parsing.
//!
//! RSS 0.9/1.0/2.0 and Atom documents are parsed with `feed-rs`, then reduced
//! to the three entry fields the digest needs.

use crate::error::FeedError;
use feed_rs::model::{self, Link};
use tracing::{debug, instrument};

/// A parsed feed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub title: String,
    pub entries: Vec<FeedEntry>,
}

/// One `<item>` or `<entry>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub summary: String,
    pub link: String,
}

/// Parse a feed document, keeping at most `max_entries` entries.
#[instrument(level = "debug", skip(body), fields(bytes = body.len()))]
pub fn parse_feed(body: &[u8], max_entries: usize) -> Result<Feed, FeedError> {
    let parsed = feed_rs::parser::parse(body)?;

    let feed = Feed {
        title: text(parsed.title),
        entries: parsed.entries.into_iter().take(max_entries).map(into_entry).collect(),
    };
    debug!(title = %feed.title, entries = feed.entries.len(), "Parsed feed");
    Ok(feed)
}

fn into_entry(entry: model::Entry) -> FeedEntry {
    let summary = match text(entry.summary) {
        s if s.is_empty() => entry
            .content
            .and_then(|c| c.body)
            .map(|body| body.trim().to_string())
            .unwrap_or_default(),
        s => s,
    };

    FeedEntry {
        title: text(entry.title),
        summary,
        link: pick_link(&entry.links).unwrap_or_default(),
    }
}

fn text(t: Option<model::Text>) -> String {
    t.map(|t| t.content.trim().to_string()).unwrap_or_default()
}

/// The article link: the first one with no `rel` or `rel="alternate"`,
/// otherwise whatever comes first.
fn pick_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
        .or_else(|| links.first())
        .map(|l| l.href.trim().to_string())
}
