pub mod error;
pub mod logging;
pub mod models;
pub mod provider;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::InferenceModel;
pub use provider::NewsProvider;
pub use storage::SummaryCache;
pub use types::{
    Article, ArticleDigest, CacheKey, Category, Language, NewsDigest, SummaryResult, SummaryStatus,
};
