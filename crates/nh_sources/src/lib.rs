pub mod manager;
pub mod providers;

pub use manager::{NewsManager, ManagerConfig};
pub use providers::{create_provider, FetchConfig, NewsApiClient};

pub mod prelude {
    pub use super::manager::NewsManager;
    pub use super::providers::create_provider;
    pub use nh_core::{Article, Category, Language, NewsDigest, NewsProvider, Result, Error};
}
