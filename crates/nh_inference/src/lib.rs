use std::fmt;
use nh_core::Result;

pub mod models;
pub mod summarizer;

#[derive(Clone)]
pub struct Config {
    /// `openai`, `deepseek` or `dummy`
    pub provider: String,
    pub api_key: Option<String>,
    /// Overrides the provider's default chat model
    pub model_name: Option<String>,
    /// Overrides the provider's API base URL
    pub model_url: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: None,
            model_name: None,
            model_url: None,
        }
    }
}

impl Config {
    /// API key, failing if none was configured or it is blank.
    pub fn require_api_key(&self) -> Result<String> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => Err(nh_core::Error::Config(format!(
                "An API key is required for the {} model",
                self.provider
            ))),
        }
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::create_model;
    pub use super::summarizer::Summarizer;
    pub use nh_core::{InferenceModel, Language, Result, Error};
}

pub use models::create_model;
pub use summarizer::Summarizer;
