use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::RequestId;
use crate::models::{ListingSort, RankedResult};
use crate::services::subreddits;

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Unknown routes
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// Search subreddits by name, passing the upstream payload through
pub async fn search_subreddits(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Value>> {
    let payload =
        subreddits::search_subreddits(state.client.as_ref(), &name, state.search_limit).await?;
    Ok(Json(payload))
}

/// Authors of a subreddit's posts for the given listing type
pub async fn search_author_subreddit_posts(
    State(state): State<AppState>,
    Path((subreddit, search_type)): Path<(String, String)>,
) -> AppResult<Json<Vec<String>>> {
    let sort: ListingSort = search_type.parse()?;
    let authors =
        subreddits::list_authors(state.client.as_ref(), &subreddit, sort, state.sample_size)
            .await?;
    Ok(Json(authors))
}

/// Distinct subreddits a user has posted in
pub async fn search_subreddits_by_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    let subreddits = subreddits::subreddits_by_user(state.client.as_ref(), &username).await?;
    Ok(Json(subreddits))
}

/// Subreddits related to the given one, ranked by shared authors
pub async fn get_recommended_subreddits(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(subreddit): Path<String>,
) -> AppResult<Json<Vec<RankedResult>>> {
    tracing::info!(
        request_id = %request_id,
        community = %subreddit,
        "Processing recommendation request"
    );

    let ranked = state.engine.recommend(&subreddit).await?;

    tracing::info!(
        request_id = %request_id,
        results = ranked.len(),
        "Recommendation request completed"
    );

    Ok(Json(ranked))
}
