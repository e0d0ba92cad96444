use std::fmt;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use nh_core::{Article, Category, Error, NewsProvider, Result};
use super::utils;

pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";

// The API refuses larger pages
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    source: Option<RawSource>,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

impl RawArticle {
    fn into_article(self, category: Category) -> Option<Article> {
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        let title = utils::first_non_blank(&[self.title.as_deref()])
            .unwrap_or("[Title Unavailable]")
            .to_string();
        let body = utils::first_non_blank(&[
            self.description.as_deref(),
            self.content.as_deref(),
            Some(title.as_str()),
        ])
        .unwrap_or_default()
        .to_string();
        let source = self
            .source
            .and_then(|s| s.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "[Source Unavailable]".to_string());
        let image_url = self.url_to_image.filter(|u| !u.trim().is_empty());
        let published_at = self
            .published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        Some(Article {
            id: Article::id_for_url(&url),
            title,
            body,
            source,
            category,
            url,
            image_url,
            published_at,
        })
    }
}

/// Top-headlines client for newsapi.org
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(api_key: String, base_url: Option<&str>) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config("A NewsAPI key is required".to_string()));
        }
        let base_url = utils::parse_url(base_url.unwrap_or(NEWSAPI_BASE_URL))?;
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_headlines(&self, category: Category, limit: usize) -> Result<Vec<Article>> {
        let page_size = limit.clamp(1, MAX_PAGE_SIZE).to_string();
        tracing::debug!("Requesting {} top headlines for {}", page_size, category);

        let response = self
            .client
            .get(format!("{}/top-headlines", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("category", category.as_str()),
                ("language", "en"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::NewsProvider(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::NewsProvider(format!("failed to read response: {}", e)))?;

        let parsed: HeadlinesResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                return Err(Error::NewsProvider(format!("unreadable response: {}", e)))
            }
            Err(_) => return Err(Error::NewsProvider(format!("HTTP {}", status))),
        };

        if !status.is_success() || parsed.status != "ok" {
            return Err(Error::NewsProvider(format!(
                "{}: {}",
                parsed.code.unwrap_or_else(|| status.to_string()),
                parsed.message.unwrap_or_else(|| "request rejected".to_string())
            )));
        }

        let articles: Vec<Article> = parsed
            .articles
            .into_iter()
            .filter_map(|raw| raw.into_article(category))
            .take(limit)
            .collect();
        tracing::info!("Response received from NewsAPI. {} articles were retrieved.", articles.len());
        Ok(articles)
    }
}
