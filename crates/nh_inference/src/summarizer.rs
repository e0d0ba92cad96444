use std::fmt;
use std::sync::Arc;
use chrono::Utc;
use nh_core::{Article, InferenceModel, Language, Result, SummaryResult};

/// Only this many characters of an article are sent to the model.
pub const MAX_INPUT_CHARS: usize = 1000;

/// Turns articles into `SummaryResult`s: summarize in English, then translate
/// when another language was asked for.
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn InferenceModel>,
}

impl fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("model", &self.model.name())
            .finish()
    }
}

impl Summarizer {
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Only a failed summary is an error. A failed translation keeps the
    /// English text for that field.
    pub async fn summarize(&self, article: &Article, language: Language) -> Result<SummaryResult> {
        let text = truncate_chars(&article.body, MAX_INPUT_CHARS);
        let summary = self.model.summarize(text).await?;
        let summary = self.translate_or_keep(summary, language).await;
        let title = self.translate_or_keep(article.title.clone(), language).await;

        Ok(SummaryResult {
            article_id: article.id.clone(),
            language,
            title,
            summary,
            generated_at: Utc::now(),
        })
    }

    /// English titles are returned untouched without calling the model.
    pub async fn translate_title(&self, title: &str, language: Language) -> Result<String> {
        if language.is_english() {
            return Ok(title.to_string());
        }
        self.model.translate(title, language).await
    }

    async fn translate_or_keep(&self, text: String, language: Language) -> String {
        if language.is_english() {
            return text;
        }
        match self.model.translate(&text, language).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("Translation to {} failed, keeping English text: {}", language.name(), e);
                text
            }
        }
    }

    pub async fn warm_up(&self) -> Result<()> {
        self.model.warm_up().await
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nh_core::Category;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingModel {
        calls: Mutex<Vec<String>>,
        fail_translation: bool,
    }

    #[async_trait::async_trait]
    impl InferenceModel for RecordingModel {
        fn name(&self) -> &str {
            "Recording"
        }

        async fn summarize(&self, text: &str) -> Result<String> {
            self.calls.lock().unwrap().push(format!("summarize:{}", text.chars().count()));
            Ok("An English summary".to_string())
        }

        async fn translate(&self, text: &str, language: Language) -> Result<String> {
            self.calls.lock().unwrap().push(format!("translate:{}", language.code()));
            if self.fail_translation {
                return Err(nh_core::Error::Inference("translation failed".to_string()));
            }
            Ok(format!("[{}] {}", language.code(), text))
        }
    }

    fn article(body: String) -> Article {
        Article {
            id: "a1".to_string(),
            title: "Chip shortage eases".to_string(),
            body,
            source: "Wire".to_string(),
            category: Category::Technology,
            url: "https://example.com/chips".to_string(),
            image_url: None,
            published_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_english_summary_skips_translation() {
        let model = Arc::new(RecordingModel::default());
        let summarizer = Summarizer::new(model.clone());

        let result = summarizer.summarize(&article("Body".to_string()), Language::English).await.unwrap();
        assert_eq!(result.summary, "An English summary");
        assert_eq!(result.title, "Chip shortage eases");
        assert_eq!(result.article_id, "a1");
        assert_eq!(result.language, Language::English);
        assert_eq!(*model.calls.lock().unwrap(), vec!["summarize:4".to_string()]);
    }

    #[tokio::test]
    async fn test_other_language_translates_summary() {
        let model = Arc::new(RecordingModel::default());
        let summarizer = Summarizer::new(model.clone());

        let result = summarizer.summarize(&article("Body".to_string()), Language::French).await.unwrap();
        assert_eq!(result.summary, "[fr] An English summary");
        assert_eq!(result.title, "[fr] Chip shortage eases");
        assert_eq!(model.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_translation_keeps_english() {
        let model = Arc::new(RecordingModel { fail_translation: true, ..RecordingModel::default() });
        let summarizer = Summarizer::new(model.clone());

        let result = summarizer.summarize(&article("Body".to_string()), Language::Spanish).await.unwrap();
        assert_eq!(result.summary, "An English summary");
        assert_eq!(result.title, "Chip shortage eases");
        assert_eq!(result.language, Language::Spanish);
    }

    #[tokio::test]
    async fn test_long_body_is_truncated() {
        let model = Arc::new(RecordingModel::default());
        let summarizer = Summarizer::new(model.clone());

        summarizer.summarize(&article("é".repeat(5000)), Language::English).await.unwrap();
        assert_eq!(model.calls.lock().unwrap()[0], "summarize:1000");
    }

    #[tokio::test]
    async fn test_translate_title() {
        let model = Arc::new(RecordingModel::default());
        let summarizer = Summarizer::new(model.clone());

        assert_eq!(summarizer.translate_title("Hello", Language::English).await.unwrap(), "Hello");
        assert!(model.calls.lock().unwrap().is_empty());
        assert_eq!(summarizer.translate_title("Hello", Language::German).await.unwrap(), "[de] Hello");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ééé", 2), "éé");
    }
}
