pub mod recommendations;
pub mod reddit;
pub mod subreddits;

pub use recommendations::{RecommendationEngine, RecommendationSettings};
pub use reddit::{ActivityClient, RedditClient};
