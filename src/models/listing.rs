//! Wire types for the Reddit listing envelope.
//!
//! Every field is defaulted so that schema drift upstream degrades to empty
//! values instead of a decode failure. Only a body that is not a JSON object at
//! all is treated as malformed.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::Submission;

/// `{"kind": "Listing", "data": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditListing {
    #[serde(default)]
    pub data: RedditListingData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditListingData {
    #[serde(default)]
    pub children: Vec<RedditThing>,
}

/// A single listing child (`t3` for link submissions)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditThing {
    #[serde(default)]
    pub data: RedditPost,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subreddit: Option<String>,
    #[serde(default)]
    pub created_utc: Option<f64>,
}

impl From<RedditPost> for Submission {
    fn from(post: RedditPost) -> Self {
        let created_at = post
            .created_utc
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0));

        Submission {
            title: post.title,
            author: post.author.unwrap_or_default(),
            community: post.subreddit.unwrap_or_default(),
            created_at,
        }
    }
}

impl RedditListing {
    /// Flattens the envelope into submissions, preserving upstream order
    pub fn into_submissions(self) -> Vec<Submission> {
        self.data
            .children
            .into_iter()
            .map(|child| Submission::from(child.data))
            .collect()
    }
}
