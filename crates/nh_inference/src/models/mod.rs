use std::sync::Arc;
use nh_core::{Error, InferenceModel, Result};
use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Names accepted by `create_model`
pub const AVAILABLE_MODELS: [&str; 3] = ["openai", "deepseek", "dummy"];

pub fn create_model(config: &Config) -> Result<Arc<dyn InferenceModel>> {
    let model: Arc<dyn InferenceModel> = match config.provider.to_lowercase().as_str() {
        "openai" => Arc::new(OpenAiModel::openai(config)?),
        "deepseek" => Arc::new(OpenAiModel::deepseek(config)?),
        "dummy" => Arc::new(DummyModel::new()),
        other => {
            return Err(Error::Config(format!(
                "Unknown model '{}'. Available models: {}",
                other,
                AVAILABLE_MODELS.join(", ")
            )))
        }
    };
    tracing::debug!("Created inference model {}", model.name());
    Ok(model)
}
