use crate::{error::AppResult, models::ListingSort, services::reddit::ActivityClient};
use std::collections::HashSet;

/// Raw subreddit search results
pub async fn search_subreddits(
    client: &dyn ActivityClient,
    query: &str,
    limit: u32,
) -> AppResult<serde_json::Value> {
    client.search_communities(query, limit).await
}

/// Authors of a subreddit's listing, in listing order (repeats kept)
pub async fn list_authors(
    client: &dyn ActivityClient,
    community: &str,
    sort: ListingSort,
    limit: u32,
) -> AppResult<Vec<String>> {
    let submissions = client.list_submissions(community, sort, limit).await?;
    Ok(submissions.into_iter().map(|s| s.author).collect())
}

/// Distinct subreddits a user has submitted to, in first-seen order
pub async fn subreddits_by_user(
    client: &dyn ActivityClient,
    username: &str,
) -> AppResult<Vec<String>> {
    let submissions = client.list_user_submissions(username).await?;

    let mut seen = HashSet::new();
    Ok(submissions
        .into_iter()
        .map(|s| s.community)
        .filter(|c| seen.insert(c.clone()))
        .collect())
}
