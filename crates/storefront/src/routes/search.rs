//! Search route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::search::SearchOutcome;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Rank products for the query.
///
/// Repository failures are reported in the `error` field of a normal 200
/// response, with no hits.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchOutcome> {
    Json(state.ranker().search(&query.q).await)
}
