use std::sync::Arc;
use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use nh_core::logging::Logger;
use nh_core::{
    Article, ArticleDigest, CacheKey, Category, Language, NewsDigest, NewsProvider, Result,
    SummaryCache, SummaryStatus,
};
use nh_inference::Summarizer;
use crate::providers::DEFAULT_PAGE_SIZE;

/// Articles with less text than this are not sent to the model, and model
/// answers shorter than this are not shown.
pub const MIN_CONTENT_CHARS: usize = 50;

pub const CONTENT_UNAVAILABLE: &str = "Content unavailable for this article.";
pub const SUMMARY_FAILED: &str =
    "Unable to generate summary due to an error. Please refer to the original article for information.";

pub fn summary_unavailable(url: &str) -> String {
    format!("Summary unavailable. Please read the full article at: {}", url)
}

#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Headlines requested per category
    pub page_size: usize,
    /// Articles processed at the same time within one request
    pub concurrency: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: 10,
        }
    }
}

/// Runs one request end to end: fetch, look up the cache, summarize the
/// misses, store them, and hand back a digest in provider order.
pub struct NewsManager {
    provider: Arc<dyn NewsProvider>,
    summarizer: Summarizer,
    cache: Arc<dyn SummaryCache>,
    semaphore: Arc<Semaphore>,
    config: ManagerConfig,
}

impl NewsManager {
    pub fn new(
        provider: Arc<dyn NewsProvider>,
        summarizer: Summarizer,
        cache: Arc<dyn SummaryCache>,
        config: ManagerConfig,
    ) -> Self {
        Self {
            provider,
            summarizer,
            cache,
            semaphore: Arc::new(Semaphore::new(config.concurrency.max(1))),
            config,
        }
    }

    pub fn cache(&self) -> &Arc<dyn SummaryCache> {
        &self.cache
    }

    pub fn model_name(&self) -> &str {
        self.summarizer.model_name()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Best effort; a failed warm-up is logged and otherwise ignored.
    pub async fn warm_up(&self) {
        match self.summarizer.warm_up().await {
            Ok(()) => tracing::info!("🔥 {} connection warmed up successfully", self.model_name()),
            Err(e) => tracing::error!("Failed to warm up {} connection: {}", self.model_name(), e),
        }
    }

    pub async fn aggregate(&self, category: Category, language: Language) -> Result<NewsDigest> {
        let logger = Logger::new().with_prefix(format!("[{}/{}]", category, language));
        logger.info(&format!("📰 Fetching headlines from {}", self.provider.name()));

        let articles = match self.provider.fetch_headlines(category, self.config.page_size).await {
            Ok(articles) => articles,
            Err(e) => {
                logger.error(&format!("Error fetching headlines: {}", e));
                return Err(e);
            }
        };
        logger.info(&format!("We have got {} articles. Now they are processing...", articles.len()));

        let futures: Vec<_> = articles
            .into_iter()
            .map(|article| self.process_article(article, category, language, &logger))
            .collect();
        let digests = join_all(futures).await.into_iter().collect::<Result<Vec<_>>>()?;

        logger.info(&format!("✅ Successfully processed {} articles", digests.len()));
        Ok(NewsDigest {
            category,
            language,
            articles: digests,
            generated_at: Utc::now(),
        })
    }

    async fn process_article(
        &self,
        article: Article,
        category: Category,
        language: Language,
        logger: &Logger,
    ) -> Result<ArticleDigest> {
        let logger = logger.clone().with_prefix(format!("[{}]", article.id));

        if article.body.chars().count() < MIN_CONTENT_CHARS {
            logger.warn(&format!("Skipping article due to insufficient content: {}", article.title));
            let mut article = article;
            article.image_url = None;
            return Ok(ArticleDigest {
                title: article.title.clone(),
                article,
                summary: CONTENT_UNAVAILABLE.to_string(),
                status: SummaryStatus::InsufficientContent,
            });
        }

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| nh_core::Error::External(e.into()))?;

        let key = CacheKey::new(category, language, article.id.clone());
        let (title, summary, mut status) = match self.cache.get(&key).await? {
            Some(cached) => {
                logger.debug("Cache hit");
                (cached.title, cached.summary, SummaryStatus::Cached)
            }
            None => {
                logger.debug("Cache miss, summarizing");
                match self.summarizer.summarize(&article, language).await {
                    Ok(result) => {
                        let (title, summary) = (result.title.clone(), result.summary.clone());
                        self.cache.put(key, result).await?;
                        (title, summary, SummaryStatus::Fresh)
                    }
                    Err(e) => {
                        logger.error(&format!("Error summarizing article: {}", e));
                        let title = match self.summarizer.translate_title(&article.title, language).await {
                            Ok(title) => title,
                            Err(e) => {
                                logger.warn(&format!("Error translating title, keeping original: {}", e));
                                article.title.clone()
                            }
                        };
                        (title, SUMMARY_FAILED.to_string(), SummaryStatus::Failed)
                    }
                }
            }
        };

        let summary = if status != SummaryStatus::Failed && summary.chars().count() < MIN_CONTENT_CHARS {
            status = SummaryStatus::Unavailable;
            summary_unavailable(&article.url)
        } else {
            summary
        };

        Ok(ArticleDigest {
            article,
            title,
            summary,
            status,
        })
    }
}
