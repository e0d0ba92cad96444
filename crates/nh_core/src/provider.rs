use async_trait::async_trait;
use crate::types::{Article, Category};
use crate::Result;

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Name of the news source, for logs
    fn name(&self) -> &str;

    /// Top headlines for a category, at most `limit` of them
    async fn fetch_headlines(&self, category: Category, limit: usize) -> Result<Vec<Article>>;
}
