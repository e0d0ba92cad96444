use async_trait::async_trait;
use crate::types::Language;
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync {
    fn name(&self) -> &str;

    /// Summarize a piece of article text in English
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Translate text into the target language
    async fn translate(&self, text: &str, language: Language) -> Result<String>;

    /// Open the connection to the provider ahead of the first real request
    async fn warm_up(&self) -> Result<()> {
        Ok(())
    }
}
