//! Error types for the recoverable and fatal failure modes of a run.
//!
//! [`FeedError`] and [`AnalysisError`] are always recovered per item by the
//! pipeline. [`ConfigError`] aborts the process at startup.

use thiserror::Error;

/// A single feed could not be pulled or understood.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("invalid feed URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("feed parse error: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

/// The completion service call for one article failed.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion service returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("completion service returned no content")]
    EmptyResponse,
}

/// Startup configuration problems; these end the run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no language-model API key: pass --api-key or set OPENAI_API_KEY")]
    MissingApiKey,

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("relevance threshold must be within 0..=10, got {0}")]
    InvalidThreshold(u8),
}
