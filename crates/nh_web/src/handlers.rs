use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use nh_core::{Category, Error, Language, NewsDigest};
use crate::error::ApiError;
use crate::presenter;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub category: Option<String>,
    pub language: Option<String>,
}

impl NewsQuery {
    fn non_blank(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    fn is_empty(&self) -> bool {
        Self::non_blank(&self.category).is_none() && Self::non_blank(&self.language).is_none()
    }

    /// Both fields must be present and valid. The error is shown to the user as is.
    fn selection(&self) -> Result<(Category, Language), String> {
        let (Some(category), Some(language)) =
            (Self::non_blank(&self.category), Self::non_blank(&self.language))
        else {
            return Err(presenter::MISSING_SELECTION.to_string());
        };
        let category = category
            .parse::<Category>()
            .map_err(|_| format!("Unknown news category: {}", category))?;
        let language = language
            .parse::<Language>()
            .map_err(|_| format!("Unsupported language: {}", language))?;
        Ok((category, language))
    }
}

#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Html<String> {
    let category = NewsQuery::non_blank(&query.category).and_then(|c| c.parse().ok());
    let language = NewsQuery::non_blank(&query.language)
        .and_then(|l| l.parse().ok())
        .unwrap_or_default();

    if query.is_empty() {
        return Html(presenter::render_page(category, language, None));
    }

    let output = match query.selection() {
        Ok((category, language)) => match state.manager.aggregate(category, language).await {
            Ok(digest) => presenter::render_digest(&digest),
            Err(e) if e.is_provider_error() => {
                presenter::render_message(&format!("Could not load news: {}", e))
            }
            Err(e) => {
                tracing::error!("Error in news aggregation: {}", e);
                presenter::render_message(presenter::TECHNICAL_DIFFICULTIES)
            }
        },
        Err(message) => presenter::render_message(&message),
    };

    Html(presenter::render_page(category, language, Some(&output)))
}

pub async fn list_categories() -> Json<Vec<Category>> {
    Json(Category::ALL.to_vec())
}

pub async fn list_languages() -> Json<Vec<LanguageInfo>> {
    Json(
        Language::ALL
            .iter()
            .map(|l| LanguageInfo { code: l.code(), name: l.name() })
            .collect(),
    )
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<NewsDigest>, ApiError> {
    let (category, language) = query.selection().map_err(Error::InvalidInput)?;
    let digest = state.manager.aggregate(category, language).await?;
    Ok(Json(digest))
}

pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let cleared = state.manager.cache().clear().await?;
    tracing::info!("🧹 Cleared {} cached summaries", cleared);
    Ok(Json(json!({ "cleared": cleared })))
}

pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let cached = state.manager.cache().len().await?;
    Ok(Json(json!({
        "status": "ok",
        "provider": state.manager.provider_name(),
        "model": state.manager.model_name(),
        "cached_summaries": cached,
    })))
}
