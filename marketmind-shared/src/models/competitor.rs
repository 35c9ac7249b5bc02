use serde::{Deserialize, Serialize};

/// Body of `POST /competitor/analyze`.
///
/// `url` is either a competitor web address or a free-text company/topic name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompetitorRequest {
    /// Competitor URL or topic.
    pub url: String,
}

/// Strategic read-out for one competitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitorAnalysis {
    /// How the competitor positions itself.
    pub positioning: String,
    /// Model confidence, 0–100.
    pub confidence_score: f64,
    /// Key advantages.
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Flaws or missing features.
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Opportunities the competitor leaves open.
    #[serde(default)]
    pub market_gaps: Vec<String>,
    /// How to compete.
    pub recommended_strategy: String,
}
