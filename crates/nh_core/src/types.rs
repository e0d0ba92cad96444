use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Error;

/// News categories accepted by the headline provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::General
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown news category: {}", s)))
    }
}

/// Target languages for summaries. English is the source language of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Chinese,
    Hindi,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
        Language::Hindi,
        Language::Arabic,
    ];

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Chinese => "zh",
            Language::Hindi => "hi",
            Language::Arabic => "ar",
        }
    }

    /// English name, as used in translation prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Chinese => "Chinese",
            Language::Hindi => "Hindi",
            Language::Arabic => "Arabic",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    /// Accepts either the ISO code (`fr`) or the English name (`French`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(wanted) || l.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidInput(format!("Unsupported language: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub body: String,
    pub source: String,
    pub category: Category,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl Article {
    /// Stable identifier for an article. The headline provider has no ids of
    /// its own, so the URL is hashed.
    pub fn id_for_url(url: &str) -> String {
        let digest = format!("{:x}", Sha256::digest(url.as_bytes()));
        digest[..16].to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub article_id: String,
    pub language: Language,
    /// Headline in `language`
    pub title: String,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub category: Category,
    pub language: Language,
    pub article_id: String,
}

impl CacheKey {
    pub fn new(category: Category, language: Language, article_id: impl Into<String>) -> Self {
        Self {
            category,
            language,
            article_id: article_id.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.language, self.article_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    /// Generated for this request and stored in the cache
    Fresh,
    Cached,
    /// Article text too short to be worth summarizing
    InsufficientContent,
    /// The model answered with something too short to show
    Unavailable,
    Failed,
}

/// One article as shown to the reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDigest {
    pub article: Article,
    pub title: String,
    pub summary: String,
    pub status: SummaryStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDigest {
    pub category: Category,
    pub language: Language,
    pub articles: Vec<ArticleDigest>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("technology".parse::<Category>().unwrap(), Category::Technology);
        assert_eq!(" Sports ".parse::<Category>().unwrap(), Category::Sports);
        assert!("weather".parse::<Category>().is_err());
    }

    #[test]
    fn test_language_parsing_accepts_code_and_name() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::French);
        assert_eq!("French".parse::<Language>().unwrap(), Language::French);
        assert_eq!("ZH".parse::<Language>().unwrap(), Language::Chinese);
        assert!("klingon".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_article_id_is_deterministic() {
        let a = Article::id_for_url("https://example.com/story");
        let b = Article::id_for_url("https://example.com/story");
        let c = Article::id_for_url("https://example.com/other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_cache_key_display() {
        let key = CacheKey::new(Category::Technology, Language::French, "abc123");
        assert_eq!(key.to_string(), "technology/fr/abc123");
        assert_eq!(key, CacheKey::new(Category::Technology, Language::French, "abc123".to_string()));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&SummaryStatus::InsufficientContent).unwrap();
        assert_eq!(json, "\"insufficient_content\"");
    }
}
