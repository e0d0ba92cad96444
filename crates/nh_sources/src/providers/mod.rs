use std::fmt;
use std::sync::Arc;
use nh_core::{NewsProvider, Result};

pub mod newsapi;

pub use newsapi::NewsApiClient;

pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Clone)]
pub struct FetchConfig {
    pub api_key: Option<String>,
    /// Overrides the provider's API base URL
    pub base_url: Option<String>,
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
        }
    }
}

pub fn create_provider(config: &FetchConfig) -> Result<Arc<dyn NewsProvider>> {
    let client = NewsApiClient::new(
        config.api_key.clone().unwrap_or_default(),
        config.base_url.as_deref(),
    )?;
    Ok(Arc::new(client))
}

/// Common utilities for providers
pub(crate) mod utils {
    use nh_core::{Error, Result};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    /// First non-blank candidate, trimmed.
    pub fn first_non_blank<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
        candidates
            .iter()
            .flatten()
            .copied()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}
