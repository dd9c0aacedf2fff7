use serde::Serialize;

/// Accumulator for one related subreddit while authors are being folded in
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommunityStat {
    /// Distinct sampled authors seen posting in the subreddit
    pub count: u32,
    /// Overlap numerator during accumulation; a percentage once finalized
    pub author_overlap: f64,
}

/// One row of the recommendation response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub community: String,
    pub occurrence: u32,
    /// Percentage of sampled authors who also posted in `community`
    pub author_overlap: f64,
}
