/// Reddit public JSON API client
///
/// Read-only access to the three listings the service needs:
/// 1. Subreddit listing: /r/{subreddit}/{sort}.json → submissions with authors
/// 2. User history: /user/{username}/submitted.json → submissions across subreddits
/// 3. Subreddit search: /subreddits/search.json → passed through untouched
///
/// No retries and no caching. Each call is one outbound request.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ListingSort, RedditListing, Submission},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

const MAX_NAME_LEN: usize = 64;

/// Upstream activity source used by the recommendation engine
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ActivityClient: Send + Sync {
    /// Fetch up to `limit` submissions from a subreddit in the given order
    async fn list_submissions(
        &self,
        community: &str,
        sort: ListingSort,
        limit: u32,
    ) -> AppResult<Vec<Submission>>;

    /// Fetch up to `limit` currently trending submissions from a subreddit
    async fn list_hot_submissions(
        &self,
        community: &str,
        limit: u32,
    ) -> AppResult<Vec<Submission>> {
        self.list_submissions(community, ListingSort::Hot, limit).await
    }

    /// Fetch an author's recent submission history across all subreddits
    async fn list_user_submissions(&self, author: &str) -> AppResult<Vec<Submission>>;

    /// Search subreddits by name, returning the raw upstream payload
    async fn search_communities(&self, query: &str, limit: u32) -> AppResult<serde_json::Value>;
}

/// Rejects names that are unsafe to interpolate into an upstream path.
pub fn validate_name<'a>(kind: &str, name: &'a str) -> AppResult<&'a str> {
    if name.is_empty() {
        return Err(AppError::InvalidInput(format!("{} cannot be empty", kind)));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AppError::InvalidInput(format!(
            "{} exceeds {} characters",
            kind, MAX_NAME_LEN
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::InvalidInput(format!(
            "{} contains invalid characters: {}",
            kind, name
        )));
    }
    Ok(name)
}

#[derive(Clone)]
pub struct RedditClient {
    http_client: HttpClient,
    api_url: String,
}

impl RedditClient {
    pub fn new(api_url: impl Into<String>, user_agent: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.reddit_api_url.clone(),
            &config.user_agent,
            config.upstream_timeout(),
        )
    }

    /// Issues a GET and decodes the body, mapping non-2xx and undecodable bodies to errors
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self.http_client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                url = %url,
                status = %status,
                body = %body,
                "Upstream request rejected"
            );
            return Err(AppError::Upstream(format!(
                "Reddit API returned status {} for {}",
                status, path
            )));
        }

        let response_text = response.text().await?;

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                "Failed to deserialize Reddit response"
            );
            AppError::MalformedPayload(format!("Failed to parse Reddit response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl ActivityClient for RedditClient {
    async fn list_submissions(
        &self,
        community: &str,
        sort: ListingSort,
        limit: u32,
    ) -> AppResult<Vec<Submission>> {
        let community = validate_name("Subreddit name", community)?;
        let path = format!("/r/{}/{}.json", community, sort);

        let listing: RedditListing = self.get_json(&path, &[("limit", limit.to_string())]).await?;
        let submissions = listing.into_submissions();

        tracing::debug!(
            community = %community,
            sort = %sort,
            results = submissions.len(),
            "Subreddit listing fetched"
        );

        Ok(submissions)
    }

    async fn list_user_submissions(&self, author: &str) -> AppResult<Vec<Submission>> {
        let author = validate_name("Username", author)?;
        let path = format!("/user/{}/submitted.json", author);

        let listing: RedditListing = self.get_json(&path, &[]).await?;
        let submissions = listing.into_submissions();

        tracing::debug!(
            author = %author,
            results = submissions.len(),
            "User history fetched"
        );

        Ok(submissions)
    }

    async fn search_communities(&self, query: &str, limit: u32) -> AppResult<serde_json::Value> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let payload: serde_json::Value = self
            .get_json(
                "/subreddits/search.json",
                &[("q", query.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        tracing::info!(query = %query, "Subreddit search completed");

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(server: &MockServer) -> RedditClient {
        RedditClient::new(server.uri(), "subreddit-recs-test", Duration::from_secs(5)).unwrap()
    }

    fn listing(posts: &[(&str, &str)]) -> serde_json::Value {
        let children: Vec<_> = posts
            .iter()
            .map(|(author, subreddit)| {
                json!({
                    "kind": "t3",
                    "data": {"title": "post", "author": author, "subreddit": subreddit}
                })
            })
            .collect();
        json!({"kind": "Listing", "data": {"children": children}})
    }

    #[test]
    fn test_validate_name_accepts_reddit_names() {
        assert!(validate_name("Subreddit name", "rust").is_ok());
        assert!(validate_name("Username", "some-user_42").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_unsafe_input() {
        assert!(validate_name("Subreddit name", "").is_err());
        assert!(validate_name("Subreddit name", "../admin").is_err());
        assert!(validate_name("Subreddit name", "rust?limit=1").is_err());
        assert!(validate_name("Username", &"a".repeat(65)).is_err());
    }

    #[tokio::test]
    async fn test_list_hot_submissions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/rust/hot.json"))
            .and(query_param("limit", "50"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(listing(&[("alice", "rust"), ("bob", "rust")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let submissions = client.list_hot_submissions("rust", 50).await.unwrap();

        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].author, "alice");
        assert_eq!(submissions[1].community, "rust");
    }

    #[tokio::test]
    async fn test_list_user_submissions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/alice/submitted.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(listing(&[("alice", "golang"), ("alice", "programming")])),
            )
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let submissions = client.list_user_submissions("alice").await.unwrap();

        let communities: Vec<&str> = submissions.iter().map(|s| s.community.as_str()).collect();
        assert_eq!(communities, vec!["golang", "programming"]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/ghost/submitted.json"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let err = client.list_user_submissions("ghost").await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/rust/new.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let err = client
            .list_submissions("rust", ListingSort::New, 10)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_invalid_name_never_reaches_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[])))
            .expect(0)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let err = client.list_user_submissions("bad/name").await.unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_search_communities_passes_payload_through() {
        let server = MockServer::start().await;
        let payload = json!({
            "kind": "Listing",
            "data": {"children": [{"data": {"display_name": "rust"}}]}
        });
        Mock::given(method("GET"))
            .and(path("/subreddits/search.json"))
            .and(query_param("q", "rust lang"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let result = client.search_communities("rust lang", 100).await.unwrap();

        assert_eq!(result, payload);
    }
}
