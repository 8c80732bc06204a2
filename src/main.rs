//! # Awful Digest
//!
//! Builds persona-tailored news digests. Articles are pulled from a fixed set
//! of RSS/Atom feeds grouped by category, each article is summarized,
//! categorized and scored by an OpenAI-compatible LLM, and the results are
//! filtered and ranked for each reader persona.
//!
//! ## Usage
//!
//! ```sh
//! OPENAI_API_KEY=sk-... awful_digest --persona tech_enthusiast --format markdown
//! ```
//!
//! ## Architecture
//!
//! The application follows a sequential pipeline per persona:
//! 1. **Resolving**: map the persona to categories and categories to feed URLs
//! 2. **Fetching**: pull each feed and keep its top 5 entries
//! 3. **Analyzing**: ask the LLM for a summary, category and relevance score
//! 4. **Parsing**: recover those fields from the free-form reply
//! 5. **Curating**: keep on-topic articles at or above the threshold, rank them
//! 6. **Output**: print or write the digest as text, Markdown or JSON

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod curation;
mod error;
mod feeds;
mod models;
mod outputs;
mod parser;
mod pipeline;
mod utils;

use api::OpenAiClient;
use cli::Cli;
use config::{FEED_CATALOG, ModelSettings, require_api_key, validate_threshold};
use feeds::HttpFeedSource;
use pipeline::DigestGenerator;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr, so stdout carries only the digest) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("awful_digest starting up");

    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "Loaded .env");
    }

    let args = Cli::parse();
    debug!(personas = ?args.personas(), format = ?args.format, "Parsed CLI arguments");

    // ---- Configuration; every problem here is fatal ----
    let api_key = match require_api_key(args.api_key.as_deref()) {
        Ok(key) => key,
        Err(e) => {
            error!(error = %e, "Cannot start without a language-model credential");
            return Err(e.into());
        }
    };
    let threshold = validate_threshold(args.threshold)?;

    let settings = match &args.config {
        Some(path) => ModelSettings::load(path)?,
        None => ModelSettings::default(),
    }
    .with_overrides(args.model.clone(), args.api_base.clone());
    info!(model = %settings.model, api_base = %settings.api_base, threshold, "Configuration loaded");

    if let Some(dir) = &args.output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable (fix perms or choose a different path)");
            return Err(e);
        }
    }

    let api = OpenAiClient::new(api_key, &settings)?;
    let feed_source = HttpFeedSource::new(Duration::from_secs(settings.feed_timeout_secs))?;
    let generator = DigestGenerator::new(&FEED_CATALOG, &feed_source, &api, threshold);

    // ---- One digest per persona ----
    for persona in args.personas() {
        let report = generator.generate(persona).await;

        if report.failed_feeds() > 0 || report.degraded_analyses() > 0 {
            warn!(
                %persona,
                failed_feeds = report.failed_feeds(),
                degraded_analyses = report.degraded_analyses(),
                "Digest built with partial input"
            );
        }

        match &args.output_dir {
            Some(dir) => {
                if let Err(e) = outputs::write_report(dir, args.format, &report).await {
                    error!(%persona, error = %e, "Failed writing digest");
                    return Err(e);
                }
            }
            None => print!("{}", outputs::render(args.format, &report)?),
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
