use std::fmt;

/// Every `POST` operation the client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CompetitorAnalyze,
    RevenueSimulate,
    CampaignGenerate,
    ChatSend,
    Login,
    Register,
}

impl Endpoint {
    /// All endpoints, in navigation order.
    pub const ALL: [Self; 6] = [
        Self::CompetitorAnalyze,
        Self::RevenueSimulate,
        Self::CampaignGenerate,
        Self::ChatSend,
        Self::Login,
        Self::Register,
    ];

    /// Path relative to the API base, without a leading slash.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CompetitorAnalyze => "competitor/analyze",
            Self::RevenueSimulate => "revenue/simulate",
            Self::CampaignGenerate => "campaign/generate",
            Self::ChatSend => "chat/send",
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Message used when the backend rejects a request without a `detail`.
    #[must_use]
    pub const fn fallback_detail(self) -> &'static str {
        match self {
            Self::CompetitorAnalyze => "Failed to analyze competitor.",
            Self::RevenueSimulate => "Simulation failed.",
            Self::CampaignGenerate => "Campaign generation failed.",
            Self::ChatSend => "Chat request failed.",
            Self::Login => "Login failed",
            Self::Register => "Registration failed",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}
