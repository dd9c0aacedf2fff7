use chrono::{DateTime, Utc};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

pub mod listing;
pub mod recommendation;

pub use listing::{RedditListing, RedditPost};
pub use recommendation::{CommunityStat, RankedResult};

/// A single observed post
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub title: Option<String>,
    /// Empty when the upstream omitted the field
    pub author: String,
    /// Subreddit the submission was posted in; empty when omitted upstream
    pub community: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn new(author: impl Into<String>, community: impl Into<String>) -> Self {
        Self {
            title: None,
            author: author.into(),
            community: community.into(),
            created_at: None,
        }
    }
}

/// Listing order for a subreddit's submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingSort {
    Hot,
    New,
    Top,
    Rising,
    Controversial,
}

impl ListingSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingSort::Hot => "hot",
            ListingSort::New => "new",
            ListingSort::Top => "top",
            ListingSort::Rising => "rising",
            ListingSort::Controversial => "controversial",
        }
    }
}

impl Display for ListingSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hot" => Ok(ListingSort::Hot),
            "new" => Ok(ListingSort::New),
            "top" => Ok(ListingSort::Top),
            "rising" => Ok(ListingSort::Rising),
            "controversial" => Ok(ListingSort::Controversial),
            other => Err(AppError::InvalidInput(format!(
                "Unknown listing type: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_sort_parse() {
        assert_eq!("hot".parse::<ListingSort>().unwrap(), ListingSort::Hot);
        assert_eq!("NEW".parse::<ListingSort>().unwrap(), ListingSort::New);
        assert_eq!(
            "Controversial".parse::<ListingSort>().unwrap(),
            ListingSort::Controversial
        );
    }

    #[test]
    fn test_listing_sort_invalid() {
        let err = "best".parse::<ListingSort>().unwrap_err();
        assert!(err.to_string().contains("Unknown listing type"));
    }

    #[test]
    fn test_listing_sort_display_matches_path_segment() {
        assert_eq!(ListingSort::Rising.to_string(), "rising");
        assert_eq!(ListingSort::Top.as_str(), "top");
    }
}
