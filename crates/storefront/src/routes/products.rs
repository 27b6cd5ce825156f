//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use sts_core::{Product, ProductId};

use crate::catalog::{ProductRepository, ProductSort, TagSummary};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Deserialize empty strings as None for optional flags.
fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Product listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub featured: Option<bool>,
    #[serde(default)]
    pub sort: String,
}

/// A category or brand with its display name in the current language.
#[derive(Debug, Serialize)]
pub struct TagView {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// List products, optionally filtered and sorted.
///
/// Filters combine: `?category=phones&brand=apple` lists Apple phones.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>> {
    let catalog = state.catalog();
    let mut products = match (&query.category, &query.brand) {
        (Some(category), _) => catalog.by_category(category).await?,
        (None, Some(brand)) => catalog.by_brand(brand).await?,
        (None, None) if query.featured == Some(true) => catalog.featured().await?,
        (None, None) => catalog.all().await?,
    };

    products.retain(|p| {
        query.brand.as_ref().is_none_or(|b| &p.brand == b)
            && query.featured.is_none_or(|f| p.featured == f)
    });
    ProductSort::parse(&query.sort).apply(&mut products);

    Ok(Json(products))
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    state
        .catalog()
        .by_id(&ProductId::new(id.as_str()))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// List categories with product counts.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<TagView>> {
    let summaries = state.catalog().categories();
    Json(localize(&state, summaries).await)
}

/// List brands with product counts.
#[instrument(skip(state))]
pub async fn brands(State(state): State<AppState>) -> Json<Vec<TagView>> {
    let summaries = state.catalog().brands();
    Json(localize(&state, summaries).await)
}

async fn localize(state: &AppState, summaries: Vec<TagSummary>) -> Vec<TagView> {
    let t = state.language().lock().await.translator();
    summaries
        .into_iter()
        .map(|s| TagView {
            name: t.t(&s.name_key).to_string(),
            id: s.id,
            count: s.count,
        })
        .collect()
}
