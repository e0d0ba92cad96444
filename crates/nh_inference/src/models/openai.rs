use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use nh_core::{Error, InferenceModel, Language, Result};
use crate::Config;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_MODEL: &str = "gpt-4";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEEPSEEK_MODEL: &str = "deepseek-chat";

const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert news analyst and summarizer. Provide concise, \
insightful summaries that capture the core of news articles, including key events, figures, and implications.";

const SUMMARY_MAX_TOKENS: u32 = 150;
const SUMMARY_TEMPERATURE: f32 = 0.5;
const TRANSLATION_MAX_TOKENS: u32 = 250;
const TRANSLATION_TEMPERATURE: f32 = 0.3;

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Client for OpenAI-style `/chat/completions` endpoints. DeepSeek speaks the
/// same protocol, so both go through here.
pub struct OpenAiModel {
    client: Arc<Client>,
    label: String,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiModel {
    pub fn new(label: &str, api_key: String, base_url: &str, model: String) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self {
            client: Arc::new(Client::new()),
            label: label.to_string(),
            api_key,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn openai(config: &Config) -> Result<Self> {
        Self::new(
            "OpenAI",
            config.require_api_key()?,
            config.model_url.as_deref().unwrap_or(OPENAI_BASE_URL),
            config.model_name.clone().unwrap_or_else(|| OPENAI_MODEL.to_string()),
        )
    }

    pub fn deepseek(config: &Config) -> Result<Self> {
        Self::new(
            "DeepSeek",
            config.require_api_key()?,
            config.model_url.as_deref().unwrap_or(DEEPSEEK_BASE_URL),
            config.model_name.clone().unwrap_or_else(|| DEEPSEEK_MODEL.to_string()),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: u32, temperature: Option<f32>) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens,
            temperature,
        };

        let response = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("{} request failed: {}", self.label, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(Error::Inference(format!("{} returned {}: {}", self.label, status, message)));
        }

        let response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::Inference(format!("{} sent an unreadable response: {}", self.label, e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| Error::Inference(format!("{} returned no choices", self.label)))
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("label", &self.label)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl InferenceModel for OpenAiModel {
    fn name(&self) -> &str {
        &self.label
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        let prompt = format!(
            "Summarize this news article in 2-3 sentences. Highlight the main event, key figures, and any \
             significant impacts or outcomes. Ensure the summary is informative and contextual. Article: {}",
            text
        );
        self.chat(
            vec![ChatMessage::system(SUMMARY_SYSTEM_PROMPT), ChatMessage::user(prompt)],
            SUMMARY_MAX_TOKENS,
            Some(SUMMARY_TEMPERATURE),
        )
        .await
    }

    async fn translate(&self, text: &str, language: Language) -> Result<String> {
        let system = format!(
            "You are a professional translator. Translate the following text to {}.",
            language.name()
        );
        self.chat(
            vec![ChatMessage::system(system), ChatMessage::user(text)],
            TRANSLATION_MAX_TOKENS,
            Some(TRANSLATION_TEMPERATURE),
        )
        .await
    }

    async fn warm_up(&self) -> Result<()> {
        self.chat(vec![ChatMessage::system("Warm-up request")], 5, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
            ]
        })
    }

    fn model_for(server: &MockServer) -> OpenAiModel {
        OpenAiModel::openai(&Config {
            api_key: Some("sk-test".to_string()),
            model_url: Some(server.uri()),
            ..Config::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_summarize_sends_prompt_and_trims_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({ "model": "gpt-4", "max_tokens": 150 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("  A short summary.  ")))
            .expect(1)
            .mount(&server)
            .await;

        let summary = model_for(&server).summarize("Article text").await.unwrap();
        assert_eq!(summary, "A short summary.");
    }

    #[tokio::test]
    async fn test_translate_names_target_language() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "max_tokens": 250,
                "messages": [
                    { "role": "system", "content": "You are a professional translator. Translate the following text to French." },
                    { "role": "user", "content": "Good morning" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Bonjour")))
            .mount(&server)
            .await;

        let translated = model_for(&server).translate("Good morning", Language::French).await.unwrap();
        assert_eq!(translated, "Bonjour");
    }

    #[tokio::test]
    async fn test_api_error_is_inference_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let err = model_for(&server).summarize("Article text").await.unwrap_err();
        assert!(err.is_provider_error());
        assert!(err.to_string().contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        assert!(model_for(&server).warm_up().await.is_err());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let result = OpenAiModel::openai(&Config {
            api_key: Some("sk-test".to_string()),
            model_url: Some("not a url".to_string()),
            ..Config::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_deepseek_defaults() {
        let model = OpenAiModel::deepseek(&Config {
            provider: "deepseek".to_string(),
            api_key: Some("ds-test".to_string()),
            ..Config::default()
        })
        .unwrap();
        assert_eq!(model.name(), "DeepSeek");
        assert_eq!(model.model(), DEEPSEEK_MODEL);
        assert!(!format!("{:?}", model).contains("ds-test"));
    }
}
