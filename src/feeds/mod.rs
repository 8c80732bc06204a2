//! Feed sources for pulling raw articles.
//!
//! Each feed URL goes through the same two steps:
//!
//! 1. **Fetching**: download the feed document over HTTP
//! 2. **Parsing**: read the RSS/Atom document with [`rss::parse_feed`] and turn the
//!    first [`MAX_ENTRIES_PER_FEED`] entries into [`RawArticle`]s
//!
//! Feeds are pulled one at a time, in the order given. A feed that fails is
//! logged, recorded as a [`FeedOutcome::Failed`], and contributes no articles;
//! the remaining feeds are still pulled.

pub mod rss;

use crate::error::FeedError;
use crate::models::{FeedOutcome, RawArticle};
use crate::utils::html_to_text;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use self::rss::Feed;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Entries kept from the top of each feed.
pub const MAX_ENTRIES_PER_FEED: usize = 5;

/// Anything that can turn a feed URL into a parsed [`Feed`].
pub trait FeedSource {
    async fn fetch(&self, url: &str) -> Result<Feed, FeedError>;
}

/// Production [`FeedSource`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl FeedSource for HttpFeedSource {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Feed, FeedError> {
        let parsed = Url::parse(url).map_err(|source| FeedError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        let body = response.bytes().await?;
        rss::parse_feed(&body, MAX_ENTRIES_PER_FEED)
    }
}

/// Pull every URL in order and flatten the entries into [`RawArticle`]s.
///
/// Returns the articles alongside one [`FeedOutcome`] per URL.
#[instrument(level = "info", skip_all, fields(feeds = urls.len()))]
pub async fn fetch_articles<S: FeedSource>(
    source: &S,
    urls: &[String],
) -> (Vec<RawArticle>, Vec<FeedOutcome>) {
    let results: Vec<(String, Result<Feed, FeedError>)> = stream::iter(urls)
        .then(|url| async move { (url.clone(), source.fetch(url).await) })
        .collect()
        .await;

    let mut articles = Vec::new();
    let mut outcomes = Vec::with_capacity(results.len());

    for (url, result) in results {
        match result {
            Ok(feed) => {
                let batch = into_articles(feed, &url);
                debug!(%url, count = batch.len(), "Fetched feed");
                outcomes.push(FeedOutcome::Fetched {
                    url,
                    articles: batch.len(),
                });
                articles.extend(batch);
            }
            Err(e) => {
                error!(%url, error = %e, "Feed fetch failed; skipping");
                outcomes.push(FeedOutcome::Failed {
                    url,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(count = articles.len(), "Fetched feed articles");
    (articles, outcomes)
}

/// Convert a parsed feed into at most [`MAX_ENTRIES_PER_FEED`] articles.
fn into_articles(feed: Feed, url: &str) -> Vec<RawArticle> {
    let source = if feed.title.is_empty() {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| url.to_string())
    } else {
        feed.title
    };

    feed.entries
        .into_iter()
        .take(MAX_ENTRIES_PER_FEED)
        .map(|entry| RawArticle {
            title: html_to_text(&entry.title),
            summary: html_to_text(&entry.summary),
            link: entry.link,
            source: source.clone(),
        })
        .collect()
}
