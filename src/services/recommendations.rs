use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{CommunityStat, RankedResult, Submission},
    services::reddit::ActivityClient,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Author name Reddit reports for removed accounts
pub const DELETED_AUTHOR: &str = "[deleted]";

/// Tuning for one recommendation run
#[derive(Debug, Clone)]
pub struct RecommendationSettings {
    /// `limit` passed to the hot listing of the target subreddit
    pub sample_size: u32,
    /// Maximum author history requests in flight at once
    pub max_concurrency: usize,
    /// Deadline for each author history request
    pub author_timeout: Duration,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            sample_size: 50,
            max_concurrency: 8,
            author_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&Config> for RecommendationSettings {
    fn from(config: &Config) -> Self {
        Self {
            sample_size: config.sample_size,
            max_concurrency: config.fanout_concurrency.max(1),
            author_timeout: config.upstream_timeout(),
        }
    }
}

/// Finds subreddits related to a target subreddit by author co-occurrence.
///
/// A run has four phases:
/// 1. Sample the distinct authors of the target's hot submissions
/// 2. Fetch every sampled author's submission history (bounded concurrency, full join)
/// 3. Count, per subreddit, how many sampled authors posted there
/// 4. Derive overlap percentages and rank by count
///
/// All state lives in the call; nothing is shared between runs.
#[derive(Clone)]
pub struct RecommendationEngine {
    client: Arc<dyn ActivityClient>,
    settings: RecommendationSettings,
}

impl RecommendationEngine {
    pub fn new(client: Arc<dyn ActivityClient>, settings: RecommendationSettings) -> Self {
        Self { client, settings }
    }

    /// Ranks subreddits related to `community`.
    ///
    /// Fails only when the target listing cannot be fetched. An empty sample
    /// yields an empty list, and a failed author lookup contributes nothing.
    pub async fn recommend(&self, community: &str) -> AppResult<Vec<RankedResult>> {
        let start = Instant::now();

        let hot = self
            .client
            .list_hot_submissions(community, self.settings.sample_size)
            .await?;

        let authors = sample_authors(&hot);
        if authors.is_empty() {
            tracing::info!(community = %community, "No authors sampled, nothing to rank");
            return Ok(Vec::new());
        }

        tracing::info!(
            community = %community,
            submissions = hot.len(),
            sampled_authors = authors.len(),
            "Sampled authors from hot listing"
        );

        let histories = self.fetch_histories(&authors).await;

        let target = community.to_lowercase();
        let mut table = OccurrenceTable::default();
        for history in &histories {
            table.record_author(&AuthorCommunities::from_history(history, &target));
        }

        let ranked = table.finalize(authors.len());

        tracing::info!(
            community = %community,
            results = ranked.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Recommendations computed"
        );

        Ok(ranked)
    }

    /// Fetches each author's history, returning one entry per author in input order.
    ///
    /// Failed, timed out, or panicked lookups come back as empty histories.
    /// Dropping the returned future aborts every lookup still in flight.
    async fn fetch_histories(&self, authors: &[String]) -> Vec<Vec<Submission>> {
        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, author) in authors.iter().enumerate() {
            if is_placeholder_author(author) {
                // No history to fetch; the author still counts in the sample
                continue;
            }

            let client = Arc::clone(&self.client);
            let semaphore = Arc::clone(&semaphore);
            let author = author.clone();
            let timeout = self.settings.author_timeout;

            tasks.spawn(async move {
                let result = fetch_one(client, semaphore, &author, timeout).await;
                (index, author, result)
            });
        }

        let tasks_spawned = tasks.len();
        let mut histories: Vec<Vec<Submission>> = vec![Vec::new(); authors.len()];
        let mut failed = 0usize;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, _, Ok(submissions))) => histories[index] = submissions,
                Ok((_, author, Err(e))) => {
                    tracing::warn!(author = %author, error = %e, "Author history fetch failed");
                    failed += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Author history task join error");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            tracing::warn!(
                success_count = tasks_spawned - failed,
                failed_authors = failed,
                "Partial author history failure"
            );
        }

        histories
    }
}

async fn fetch_one(
    client: Arc<dyn ActivityClient>,
    semaphore: Arc<Semaphore>,
    author: &str,
    timeout: Duration,
) -> AppResult<Vec<Submission>> {
    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tokio::time::timeout(timeout, client.list_user_submissions(author))
        .await
        .map_err(|_| {
            AppError::Upstream(format!(
                "Timed out after {:?} fetching history for {}",
                timeout, author
            ))
        })?
}

/// Blank or removed accounts have no retrievable history
fn is_placeholder_author(author: &str) -> bool {
    author.is_empty() || author == DELETED_AUTHOR
}

/// Distinct authors in first-seen order, compared by exact name.
///
/// Placeholder authors are kept; they count toward the sampled population.
pub fn sample_authors(submissions: &[Submission]) -> Vec<String> {
    let mut seen = HashSet::new();
    submissions
        .iter()
        .map(|s| s.author.as_str())
        .filter(|author| seen.insert(*author))
        .map(str::to_string)
        .collect()
}

/// The distinct subreddits one author posted in, excluding the target.
///
/// Only constructible through [`AuthorCommunities::from_history`], so a value
/// never holds the same subreddit twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorCommunities(Vec<String>);

impl AuthorCommunities {
    /// `target_lower` must already be lower-cased.
    pub fn from_history(history: &[Submission], target_lower: &str) -> Self {
        let mut seen = HashSet::new();
        let communities = history
            .iter()
            .map(|s| s.community.as_str())
            .filter(|c| !c.is_empty() && c.to_lowercase() != target_lower)
            .filter(|c| seen.insert(*c))
            .map(str::to_string)
            .collect();
        Self(communities)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Per-subreddit counters in first-seen order
#[derive(Debug, Default)]
pub struct OccurrenceTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, CommunityStat)>,
}

impl OccurrenceTable {
    /// Counts one author toward every subreddit they posted in.
    pub fn record_author(&mut self, communities: &AuthorCommunities) {
        for community in communities.iter() {
            let slot = match self.index.get(community) {
                Some(&slot) => slot,
                None => {
                    self.entries
                        .push((community.to_string(), CommunityStat::default()));
                    self.index
                        .insert(community.to_string(), self.entries.len() - 1);
                    self.entries.len() - 1
                }
            };

            let stat = &mut self.entries[slot].1;
            stat.count += 1;
            stat.author_overlap += 1.0;
        }
    }

    pub fn get(&self, community: &str) -> Option<&CommunityStat> {
        self.index.get(community).map(|&slot| &self.entries[slot].1)
    }

    /// Converts counts into percentages of `total_sampled_authors` and ranks
    /// by count, descending. Ties keep first-seen order.
    pub fn finalize(self, total_sampled_authors: usize) -> Vec<RankedResult> {
        if total_sampled_authors == 0 {
            return Vec::new();
        }

        let total = total_sampled_authors as f64;
        let mut ranked: Vec<RankedResult> = self
            .entries
            .into_iter()
            .map(|(community, stat)| RankedResult {
                community,
                occurrence: stat.count,
                author_overlap: stat.author_overlap / total * 100.0,
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.occurrence.cmp(&a.occurrence));
        ranked
    }
}
