use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{cors_layer, make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/subreddit", subreddit_routes())
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(
            // Outermost first: the request id must exist before the trace span is made
            ServiceBuilder::new()
                .layer(cors_layer(allowed_origins))
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// Routes under /subreddit
fn subreddit_routes() -> Router<AppState> {
    Router::new()
        .route("/searchSubreddits/:name", get(handlers::search_subreddits))
        .route(
            "/searchAuthorSubredditPosts/:subreddit/:searchType",
            get(handlers::search_author_subreddit_posts),
        )
        .route(
            "/searchSubredditsByUser/:username",
            get(handlers::search_subreddits_by_user),
        )
        .route(
            "/getRecommendedSubReddits/:subReddit",
            get(handlers::get_recommended_subreddits),
        )
}
