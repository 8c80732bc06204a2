//! Static lookup tables and model settings.
//!
//! The category→feed table and the persona→category table are fixed at
//! compile time and exposed as process-wide lookups. [`ModelSettings`]
//! describes how to reach the completion endpoint and may be loaded from a
//! YAML file, with individual fields overridden from the command line.

use crate::error::ConfigError;
use clap::ValueEnum;
use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Relevance a curated article must reach unless overridden.
pub const DEFAULT_THRESHOLD: u8 = 6;

/// The fixed category vocabulary the model is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Tech,
    Finance,
    Sports,
    Entertainment,
    Science,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tech,
        Category::Finance,
        Category::Sports,
        Category::Entertainment,
        Category::Science,
    ];

    /// The lowercase key the parsed model output is compared against.
    pub fn key(self) -> &'static str {
        match self {
            Category::Tech => "tech",
            Category::Finance => "finance",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Science => "science",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A reader profile with a fixed set of preferred categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    #[value(name = "tech_enthusiast")]
    TechEnthusiast,
    #[value(name = "finance_guru")]
    FinanceGuru,
    #[value(name = "sports_journalist")]
    SportsJournalist,
    #[value(name = "entertainment_buff")]
    EntertainmentBuff,
    #[value(name = "science_nerd")]
    ScienceNerd,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::TechEnthusiast,
        Persona::FinanceGuru,
        Persona::SportsJournalist,
        Persona::EntertainmentBuff,
        Persona::ScienceNerd,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Persona::TechEnthusiast => "tech_enthusiast",
            Persona::FinanceGuru => "finance_guru",
            Persona::SportsJournalist => "sports_journalist",
            Persona::EntertainmentBuff => "entertainment_buff",
            Persona::ScienceNerd => "science_nerd",
        }
    }

    /// Preferred categories, in the order their feeds are pulled.
    pub fn categories(self) -> &'static [Category] {
        match self {
            Persona::TechEnthusiast => &[Category::Tech, Category::Science],
            Persona::FinanceGuru => &[Category::Finance, Category::Tech],
            Persona::SportsJournalist => &[Category::Sports],
            Persona::EntertainmentBuff => &[Category::Entertainment],
            Persona::ScienceNerd => &[Category::Science, Category::Tech],
        }
    }

    /// Human-facing name, e.g. `"Tech Enthusiast"`.
    pub fn display_name(self) -> String {
        self.key()
            .split('_')
            .map(crate::utils::upcase)
            .join(" ")
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Category → feed URL table.
#[derive(Debug, Clone, Default)]
pub struct FeedCatalog {
    feeds: BTreeMap<Category, Vec<String>>,
}

impl FeedCatalog {
    pub fn new(feeds: BTreeMap<Category, Vec<String>>) -> Self {
        Self { feeds }
    }

    pub fn feeds_for(&self, category: Category) -> &[String] {
        self.feeds.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Feed URLs for every category of `persona`, in category order.
    ///
    /// A URL listed under two of the persona's categories appears twice.
    pub fn urls_for(&self, persona: Persona) -> Vec<String> {
        persona
            .categories()
            .iter()
            .flat_map(|c| self.feeds_for(*c).iter().cloned())
            .collect()
    }
}

/// The built-in feed table.
pub static FEED_CATALOG: Lazy<FeedCatalog> = Lazy::new(|| {
    let table: [(Category, &[&str]); 5] = [
        (
            Category::Tech,
            &[
                "http://feeds.feedburner.com/TechCrunch",
                "https://www.wired.com/feed/rss",
                "https://www.technologyreview.com/feed",
                "http://feeds.arstechnica.com/arstechnica/technology-lab",
            ],
        ),
        (
            Category::Finance,
            &[
                "http://feeds.bloomberg.com/bloomberg/technology",
                "https://www.cnbc.com/id/19854910/device/rss/rss.html",
                "https://www.ft.com/technology?format=rss",
            ],
        ),
        (
            Category::Sports,
            &[
                "https://www.espn.com/espn/rss/news",
                "http://feeds.bbci.co.uk/sport/rss.xml",
                "https://www.skysports.com/rss/12040",
            ],
        ),
        (
            Category::Entertainment,
            &[
                "https://variety.com/feed/",
                "https://www.hollywoodreporter.com/feed",
                "https://www.billboard.com/feed/",
            ],
        ),
        (
            Category::Science,
            &[
                "https://www.nasa.gov/rss/dyn/breaking_news.rss",
                "https://www.sciencedaily.com/rss/all.xml",
                "http://feeds.arstechnica.com/arstechnica/science",
            ],
        ),
    ];

    FeedCatalog::new(
        table
            .into_iter()
            .map(|(category, urls)| (category, urls.iter().map(|u| u.to_string()).collect()))
            .collect(),
    )
});

/// How to reach the OpenAI-compatible completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Base URL, without the trailing `/chat/completions`.
    pub api_base: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub feed_timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 60,
            feed_timeout_secs: 20,
        }
    }
}

impl ModelSettings {
    /// Read settings from a YAML file; absent keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: ModelSettings = serde_yaml::from_str(&raw)?;
        info!(model = %settings.model, api_base = %settings.api_base, "Loaded model settings");
        Ok(settings)
    }

    /// Apply command-line / environment overrides on top of file values.
    pub fn with_overrides(mut self, model: Option<String>, api_base: Option<String>) -> Self {
        if let Some(model) = model {
            debug!(%model, "Overriding model");
            self.model = model;
        }
        if let Some(api_base) = api_base {
            debug!(%api_base, "Overriding api_base");
            self.api_base = api_base;
        }
        self
    }
}

/// Reject a missing or blank credential before any work starts.
pub fn require_api_key(key: Option<&str>) -> Result<String, ConfigError> {
    match key.map(str::trim) {
        Some(k) if !k.is_empty() => Ok(k.to_string()),
        _ => Err(ConfigError::MissingApiKey),
    }
}

/// Relevance thresholds live on the model's 0-10 scale.
pub fn validate_threshold(threshold: u8) -> Result<u8, ConfigError> {
    if threshold > crate::parser::MAX_RELEVANCE {
        return Err(ConfigError::InvalidThreshold(threshold));
    }
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validate_threshold() {
        assert_eq!(validate_threshold(0).unwrap(), 0);
        assert_eq!(validate_threshold(10).unwrap(), 10);
        assert!(matches!(validate_threshold(11), Err(ConfigError::InvalidThreshold(11))));
    }

    #[test]
    fn test_every_persona_has_categories() {
        for persona in Persona::ALL {
            assert!(!persona.categories().is_empty(), "{persona} has no categories");
        }
    }

    #[test]
    fn test_persona_display_name() {
        assert_eq!(Persona::TechEnthusiast.display_name(), "Tech Enthusiast");
        assert_eq!(Persona::SportsJournalist.display_name(), "Sports Journalist");
    }

    #[test]
    fn test_persona_value_enum_names() {
        let persona = Persona::from_str("finance_guru", false).unwrap();
        assert_eq!(persona, Persona::FinanceGuru);
        assert!(Persona::from_str("finance-guru", false).is_err());
    }

    #[test]
    fn test_catalog_urls_in_category_order() {
        let urls = FEED_CATALOG.urls_for(Persona::FinanceGuru);
        assert_eq!(urls.len(), 3 + 4);
        assert_eq!(urls[0], "http://feeds.bloomberg.com/bloomberg/technology");
        assert_eq!(urls[3], "http://feeds.feedburner.com/TechCrunch");
    }

    #[test]
    fn test_catalog_keeps_duplicates_across_categories() {
        let shared = "https://example.com/shared.xml".to_string();
        let catalog = FeedCatalog::new(BTreeMap::from([
            (Category::Science, vec![shared.clone()]),
            (Category::Tech, vec![shared.clone()]),
        ]));
        assert_eq!(catalog.urls_for(Persona::ScienceNerd), vec![shared.clone(), shared]);
    }

    #[test]
    fn test_empty_catalog_yields_no_urls() {
        let catalog = FeedCatalog::default();
        assert!(catalog.urls_for(Persona::TechEnthusiast).is_empty());
    }

    #[test]
    fn test_require_api_key() {
        assert_eq!(require_api_key(Some(" sk-123 ")).unwrap(), "sk-123");
        assert!(matches!(require_api_key(Some("   ")), Err(ConfigError::MissingApiKey)));
        assert!(matches!(require_api_key(None), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_model_settings_load_partial_yaml() {
        let path = std::env::temp_dir().join(format!("awful_digest_settings_{}.yaml", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "model: llama3\nrequest_timeout_secs: 5").unwrap();
        }
        let settings = ModelSettings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.model, "llama3");
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn test_model_settings_overrides() {
        let settings = ModelSettings::default()
            .with_overrides(Some("gpt-4o".to_string()), None);
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.api_base, "https://api.openai.com/v1");
    }
}
