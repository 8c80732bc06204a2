//! LLM API interaction for article analysis.
//!
//! This module talks to an OpenAI-compatible chat-completions endpoint.
//!
//! # Architecture
//!
//! - [`AskAsync`]: Core trait defining async LLM interaction
//! - [`OpenAiClient`]: `reqwest`-backed implementation for `/chat/completions`
//! - [`analyze_article`]: builds the analysis prompt for one article and asks once
//!
//! Calls are made once per article with no retry; the pipeline decides what to
//! do with a failure.

use crate::config::{Category, ModelSettings};
use crate::error::AnalysisError;
use crate::models::RawArticle;
use itertools::Itertools;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Trait for async LLM interaction.
///
/// Implementors send a prompt to a model and return its text reply. Tests use
/// scripted implementations in place of the HTTP client.
pub trait AskAsync {
    /// Send `prompt` to the model and return the reply text.
    async fn ask(&self, prompt: &str) -> Result<String, AnalysisError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(api_key: String, settings: &ModelSettings) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", settings.api_base.trim_end_matches('/')),
            model: settings.model.clone(),
        })
    }
}

impl AskAsync for OpenAiClient {
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn ask(&self, prompt: &str) -> Result<String, AnalysisError> {
        let t0 = Instant::now();
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(elapsed_ms = t0.elapsed().as_millis(), %status, "API call failed");
            return Err(AnalysisError::Status { status, body });
        }

        let completion = response.json::<ChatCompletion>().await?;
        let content = extract_content(completion)?;
        debug!(elapsed_ms = t0.elapsed().as_millis(), bytes = content.len(), "API call succeeded");
        Ok(content)
    }
}

fn extract_content(completion: ChatCompletion) -> Result<String, AnalysisError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(AnalysisError::EmptyResponse)
}

/// The analysis instructions for one article.
pub fn build_prompt(article: &RawArticle) -> String {
    let vocabulary = Category::ALL.iter().map(|c| c.key()).join(", ");
    format!(
        "Analyze this news article and provide:\n\
         1. A brief, engaging summary\n\
         2. The main category (one of: {vocabulary})\n\
         3. A relevance score (0-10) for the article based on its content quality and newsworthiness\n\
         \n\
         Answer with the summary on the first line, then a line `Category: <category>` \
         and a line `Relevance: <score>/10`.\n\
         \n\
         Title: {}\n\
         Content: {}",
        article.title, article.summary
    )
}

/// Ask the model to analyze one article. Exactly one call, no retry.
#[instrument(level = "info", skip_all, fields(title = %article.title))]
pub async fn analyze_article<A: AskAsync>(api: &A, article: &RawArticle) -> Result<String, AnalysisError> {
    api.ask(&build_prompt(article)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> RawArticle {
        RawArticle {
            title: "Webb finds water".to_string(),
            summary: "The telescope detected water vapor.".to_string(),
            link: "https://example.com/webb".to_string(),
            source: "NASA".to_string(),
        }
    }

    #[test]
    fn test_prompt_embeds_article_and_vocabulary() {
        let prompt = build_prompt(&article());
        assert!(prompt.contains("Title: Webb finds water"));
        assert!(prompt.contains("Content: The telescope detected water vapor."));
        assert!(prompt.contains("tech, finance, sports, entertainment, science"));
        assert!(prompt.contains("relevance score (0-10)"));
    }

    #[test]
    fn test_extract_content_first_choice() {
        let completion: ChatCompletion = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Summary\nCategory: science"}},
                           {"message":{"role":"assistant","content":"ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(completion).unwrap(), "Summary\nCategory: science");
    }

    #[test]
    fn test_extract_content_rejects_empty() {
        let no_choices: ChatCompletion = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_content(no_choices), Err(AnalysisError::EmptyResponse)));

        let null_content: ChatCompletion =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(extract_content(null_content), Err(AnalysisError::EmptyResponse)));

        let missing: ChatCompletion = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(matches!(extract_content(missing), Err(AnalysisError::EmptyResponse)));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: [ChatMessage { role: "user", content: "hi" }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_client_endpoint_and_redacted_debug() {
        let settings = ModelSettings {
            api_base: "http://localhost:11434/v1/".to_string(),
            ..ModelSettings::default()
        };
        let client = OpenAiClient::new("sk-secret".to_string(), &settings).unwrap();
        assert_eq!(client.endpoint, "http://localhost:11434/v1/chat/completions");
        let debug = format!("{client:?}");
        assert!(!debug.contains("sk-secret"));
    }

    struct Echo;

    impl AskAsync for Echo {
        async fn ask(&self, prompt: &str) -> Result<String, AnalysisError> {
            Ok(prompt.to_string())
        }
    }

    #[tokio::test]
    async fn test_analyze_article_sends_prompt() {
        let reply = analyze_article(&Echo, &article()).await.unwrap();
        assert_eq!(reply, build_prompt(&article()));
    }
}
