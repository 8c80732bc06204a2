//! Digest generation for one persona.
//!
//! Resolve the persona's categories to feed URLs, pull the feeds, analyze
//! each article, parse the reply, curate, and rank. Everything runs in input
//! order, one request at a time. Failed feeds and failed model calls are
//! recorded in the returned [`DigestReport`] and never abort the run.

use crate::api::{AskAsync, analyze_article};
use crate::config::{FeedCatalog, Persona};
use crate::curation::{curate, rank};
use crate::feeds::{FeedSource, fetch_articles};
use crate::models::{AnalysisOutcome, DigestReport, ParsedAnalysis};
use crate::parser::parse;
use crate::utils::truncate_for_log;
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

/// Collaborators and policy for generating digests.
pub struct DigestGenerator<'a, S, A> {
    pub catalog: &'a FeedCatalog,
    pub feeds: &'a S,
    pub api: &'a A,
    pub threshold: u8,
}

impl<'a, S: FeedSource, A: AskAsync> DigestGenerator<'a, S, A> {
    pub fn new(catalog: &'a FeedCatalog, feeds: &'a S, api: &'a A, threshold: u8) -> Self {
        Self {
            catalog,
            feeds,
            api,
            threshold,
        }
    }

    /// Build the ranked digest for `persona`.
    #[instrument(level = "info", skip(self), fields(threshold = self.threshold))]
    pub async fn generate(&self, persona: Persona) -> DigestReport {
        let categories = persona.categories();
        let urls = self.catalog.urls_for(persona);
        info!(feeds = urls.len(), "Resolved persona feeds");

        let (articles, feeds) = fetch_articles(self.feeds, &urls).await;
        let total = articles.len();

        let mut analyses = Vec::with_capacity(total);
        let mut kept = Vec::new();

        for (i, article) in articles.into_iter().enumerate() {
            debug!(index = i, title = %article.title, "Analyzing article");
            let parsed = match analyze_article(self.api, &article).await {
                Ok(text) => {
                    debug!(index = i, response_preview = %truncate_for_log(&text, 300), "Model replied");
                    analyses.push(AnalysisOutcome::Analyzed {
                        title: article.title.clone(),
                    });
                    parse(&text)
                }
                Err(e) => {
                    warn!(index = i, error = %e, "Analysis failed; using raw summary");
                    analyses.push(AnalysisOutcome::Degraded {
                        title: article.title.clone(),
                        error: e.to_string(),
                    });
                    ParsedAnalysis::degraded(&article)
                }
            };

            if let Some(curated) = curate(article, parsed, categories, self.threshold) {
                kept.push(curated);
            }
        }

        let digest = rank(kept);
        info!(
            considered = total,
            kept = digest.len(),
            degraded = analyses.iter().filter(|o| o.is_failure()).count(),
            "Digest generated"
        );

        DigestReport {
            persona,
            generated_at: Utc::now(),
            threshold: self.threshold,
            articles: digest,
            feeds,
            analyses,
        }
    }
}
