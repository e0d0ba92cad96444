use async_trait::async_trait;
use crate::types::{CacheKey, Category, Language, SummaryResult};
use crate::Result;

#[async_trait]
pub trait SummaryCache: Send + Sync {
    /// Look up a stored summary. A miss is `Ok(None)`, not an error.
    async fn get(&self, key: &CacheKey) -> Result<Option<SummaryResult>>;

    /// Store a summary, replacing whatever was there.
    async fn put(&self, key: CacheKey, value: SummaryResult) -> Result<()>;

    async fn len(&self) -> Result<usize>;

    /// Drop every entry for one (category, language) pair. Returns how many were removed.
    async fn invalidate(&self, category: Category, language: Language) -> Result<usize>;

    /// Drop everything. Returns how many entries were removed.
    async fn clear(&self) -> Result<usize>;
}
