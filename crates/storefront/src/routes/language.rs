//! Language preference and translation handlers.

use std::collections::HashMap;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sts_core::Language;

use crate::error::{AppError, Result};
use crate::i18n;
use crate::state::AppState;

/// Current language and text direction.
#[derive(Debug, Serialize)]
pub struct LanguageView {
    pub language: Language,
    pub dir: &'static str,
}

impl From<Language> for LanguageView {
    fn from(language: Language) -> Self {
        Self {
            language,
            dir: language.dir(),
        }
    }
}

/// Language change request body.
#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub language: String,
}

/// Translation table for the current language.
#[derive(Debug, Serialize)]
pub struct TranslationsView {
    #[serde(flatten)]
    pub language: LanguageView,
    pub translations: &'static HashMap<String, String>,
}

/// Show the current language.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<LanguageView> {
    Json(state.language().lock().await.current().into())
}

/// Select a language.
#[instrument(skip(state))]
pub async fn set(
    State(state): State<AppState>,
    Json(req): Json<SetLanguageRequest>,
) -> Result<Json<LanguageView>> {
    let language = Language::parse(&req.language)
        .ok_or_else(|| AppError::BadRequest(format!("unsupported language: {}", req.language)))?;
    state.language().lock().await.set(language);
    Ok(Json(language.into()))
}

/// Switch between English and Arabic.
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>) -> Json<LanguageView> {
    Json(state.language().lock().await.toggle().into())
}

/// Return every translation for the current language.
#[instrument(skip(state))]
pub async fn translations(State(state): State<AppState>) -> Json<TranslationsView> {
    let language = state.language().lock().await.current();
    Json(TranslationsView {
        language: language.into(),
        translations: i18n::table(language),
    })
}
