//! Search route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::search::{SUGGESTION_LIMIT, SearchIndex, SearchResults};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub results: SearchResults,
    /// More matches exist than were returned ("View all N results").
    pub has_more: bool,
    /// `false` until the catalog snapshot has been loaded.
    pub is_ready: bool,
}

impl SearchResponse {
    fn new(results: SearchResults, is_ready: bool) -> Self {
        Self {
            has_more: results.has_more(),
            results,
            is_ready,
        }
    }
}

/// Fail with 503 once the catalog load has failed, so visitors see the
/// failure instead of an empty result list.
fn ensure_not_failed(index: &SearchIndex) -> Result<()> {
    match index.failure()? {
        Some(message) => Err(AppError::ServiceUnavailable(message)),
        None => Ok(()),
    }
}

/// All matches for `q`, in catalog order.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let index = state.search();
    ensure_not_failed(index)?;
    let results = index.suggest(&query.q, usize::MAX)?;
    Ok(Json(SearchResponse::new(results, index.is_ready())))
}

/// Instant-search dropdown: the first few matches plus the total.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let index = state.search();
    ensure_not_failed(index)?;
    let results = index.suggest(&query.q, SUGGESTION_LIMIT)?;
    Ok(Json(SearchResponse::new(results, index.is_ready())))
}
