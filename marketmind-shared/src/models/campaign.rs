use serde::{Deserialize, Serialize};

/// Body of `POST /campaign/generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignRequest {
    /// Target audience description.
    pub audience: String,
    /// Revenue goal, free text (e.g. "$50k in Q3").
    pub revenue_goal: String,
    /// Optional insight carried over from a competitor analysis.
    #[serde(default)]
    pub competitor_insight: String,
}

/// One generated ad.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdCopy {
    /// Ad headline.
    pub headline: String,
    /// Ad body text.
    pub body: String,
}

/// Generated campaign plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Campaign {
    /// Platform the campaign should run on.
    pub recommended_platform: String,
    /// Why that platform was chosen.
    pub reasoning: String,
    /// Ad variants.
    #[serde(default)]
    pub ad_copies: Vec<AdCopy>,
    /// Value propositions to emphasise.
    #[serde(default)]
    pub value_propositions: Vec<String>,
    /// Emotional hook.
    pub emotional_hook: String,
    /// Call to action.
    pub cta: String,
}
