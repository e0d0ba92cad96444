use async_trait::async_trait;
use nh_core::{CacheKey, Category, Language, Result, SummaryCache, SummaryResult};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    /// Maximum number of entries. `None` keeps everything.
    pub capacity: Option<usize>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

pub struct MemoryStore {
    entries: HashMap<CacheKey, SummaryResult>,
    // insertion order, oldest first
    order: VecDeque<CacheKey>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<SummaryResult> {
        self.entries.get(key).cloned()
    }

    pub fn put(&mut self, key: CacheKey, value: SummaryResult) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }

        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                match self.order.pop_front() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                        tracing::warn!("Summary cache full, dropped oldest entry {}", oldest);
                    }
                    None => break,
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn invalidate(&mut self, category: Category, language: Language) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| !(key.category == category && key.language == language));
        self.order
            .retain(|key| !(key.category == category && key.language == language));
        before - self.entries.len()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.order.clear();
        removed
    }
}

/// Process-local summary cache. Cloning shares the same store.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<MemoryStore>>,
}

impl InMemoryCache {
    pub fn new(config: MemoryConfig) -> Self {
        tracing::info!(
            "Summary cache initialized (capacity: {})",
            config
                .capacity
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unbounded".to_string())
        );
        let store = Arc::new(RwLock::new(MemoryStore::new(config.capacity)));
        Self { store }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(MemoryConfig::new())
    }
}

#[async_trait]
impl SummaryCache for InMemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<SummaryResult>> {
        let store = self.store.read().await;
        let hit = store.get(key);
        if hit.is_some() {
            tracing::debug!("Cache hit for key: {}", key);
        } else {
            tracing::debug!("Cache miss for key: {}", key);
        }
        Ok(hit)
    }

    async fn put(&self, key: CacheKey, value: SummaryResult) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key, value);
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.store.read().await.len())
    }

    async fn invalidate(&self, category: Category, language: Language) -> Result<usize> {
        let mut store = self.store.write().await;
        Ok(store.invalidate(category, language))
    }

    async fn clear(&self) -> Result<usize> {
        let mut store = self.store.write().await;
        Ok(store.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn summary(article_id: &str, language: Language) -> SummaryResult {
        SummaryResult {
            article_id: article_id.to_string(),
            language,
            title: format!("Title of {}", article_id),
            summary: format!("Summary of {}", article_id),
            generated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_and_put() {
        let cache = InMemoryCache::default();
        let key = CacheKey::new(Category::Technology, Language::French, "a1");

        assert!(cache.get(&key).await.unwrap().is_none());

        let value = summary("a1", Language::French);
        cache.put(key.clone(), value.clone()).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(value));

        // same triple built separately lands in the same slot
        let same = CacheKey::new(Category::Technology, Language::French, "a1".to_string());
        assert!(cache.get(&same).await.unwrap().is_some());

        let other_language = CacheKey::new(Category::Technology, Language::German, "a1");
        assert!(cache.get(&other_language).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = InMemoryCache::default();
        let key = CacheKey::new(Category::Health, Language::English, "a1");
        cache.put(key.clone(), summary("a1", Language::English)).await.unwrap();

        let mut newer = summary("a1", Language::English);
        newer.summary = "Rewritten".to_string();
        cache.put(key.clone(), newer).await.unwrap();

        assert_eq!(cache.len().await.unwrap(), 1);
        assert_eq!(cache.get(&key).await.unwrap().unwrap().summary, "Rewritten");
    }

    #[tokio::test]
    async fn test_capacity_drops_oldest() {
        let cache = InMemoryCache::new(MemoryConfig::new().with_capacity(2));
        for id in ["a1", "a2", "a3"] {
            let key = CacheKey::new(Category::Science, Language::English, id);
            cache.put(key, summary(id, Language::English)).await.unwrap();
        }

        assert_eq!(cache.len().await.unwrap(), 2);
        let first = CacheKey::new(Category::Science, Language::English, "a1");
        let last = CacheKey::new(Category::Science, Language::English, "a3");
        assert!(cache.get(&first).await.unwrap().is_none());
        assert!(cache.get(&last).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let cache = InMemoryCache::default();
        cache
            .put(CacheKey::new(Category::Sports, Language::French, "a1"), summary("a1", Language::French))
            .await
            .unwrap();
        cache
            .put(CacheKey::new(Category::Sports, Language::French, "a2"), summary("a2", Language::French))
            .await
            .unwrap();
        cache
            .put(CacheKey::new(Category::Sports, Language::Hindi, "a1"), summary("a1", Language::Hindi))
            .await
            .unwrap();

        assert_eq!(cache.invalidate(Category::Sports, Language::French).await.unwrap(), 2);
        assert_eq!(cache.len().await.unwrap(), 1);
        assert_eq!(cache.clear().await.unwrap(), 1);
        assert_eq!(cache.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_puts_are_not_lost() {
        let cache = InMemoryCache::default();
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    let id = format!("a{}", i);
                    let key = CacheKey::new(Category::Business, Language::Spanish, id.clone());
                    cache.put(key, summary(&id, Language::Spanish)).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(cache.len().await.unwrap(), 32);
    }
}
