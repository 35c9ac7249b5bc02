use super::{PageController, SubmitError};
use crate::api::MarketMindApi;
use shared::models::{Campaign, CampaignRequest};
use std::sync::{Arc, Mutex, PoisonError};

/// Editable fields of the campaign form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignField {
    Audience,
    RevenueGoal,
    CompetitorInsight,
}

impl CampaignField {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Audience => "audience",
            Self::RevenueGoal => "revenue_goal",
            Self::CompetitorInsight => "competitor_insight",
        }
    }
}

/// Campaign generator page.
pub struct CampaignController {
    api: Arc<dyn MarketMindApi>,
    form: Mutex<CampaignRequest>,
    page: PageController<Campaign>,
}

impl CampaignController {
    #[must_use]
    pub fn new(api: Arc<dyn MarketMindApi>) -> Self {
        Self {
            api,
            form: Mutex::new(CampaignRequest::default()),
            page: PageController::new(),
        }
    }

    pub fn set_field(&self, field: CampaignField, value: impl Into<String>) {
        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = match field {
            CampaignField::Audience => &mut form.audience,
            CampaignField::RevenueGoal => &mut form.revenue_goal,
            CampaignField::CompetitorInsight => &mut form.competitor_insight,
        };
        *slot = value.into();
    }

    #[must_use]
    pub fn form(&self) -> CampaignRequest {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Generates a campaign from the current form.
    ///
    /// # Errors
    /// [`SubmitError::Required`] when the audience or revenue goal is blank,
    /// otherwise see [`PageController::submit`].
    pub async fn generate(&self) -> Result<Campaign, SubmitError> {
        let request = self.form();
        if request.audience.trim().is_empty() {
            return Err(SubmitError::Required(CampaignField::Audience.name()));
        }
        if request.revenue_goal.trim().is_empty() {
            return Err(SubmitError::Required(CampaignField::RevenueGoal.name()));
        }

        self.page.submit(self.api.generate_campaign(&request)).await
    }

    #[must_use]
    pub const fn page(&self) -> &PageController<Campaign> {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeApi;
    use crate::controllers::SubmissionState;
    use shared::models::{AdCopy, Endpoint};

    fn campaign() -> Campaign {
        Campaign {
            recommended_platform: "LinkedIn".into(),
            reasoning: "B2B".into(),
            ad_copies: vec![AdCopy {
                headline: "Grow".into(),
                body: "Now".into(),
            }],
            value_propositions: vec!["Fast".into()],
            emotional_hook: "FOMO".into(),
            cta: "Start".into(),
        }
    }

    #[tokio::test]
    async fn test_required_fields() {
        let api = Arc::new(FakeApi::new());
        let page = CampaignController::new(api.clone());

        assert_eq!(page.generate().await, Err(SubmitError::Required("audience")));
        page.set_field(CampaignField::Audience, "Founders");
        assert_eq!(
            page.generate().await,
            Err(SubmitError::Required("revenue_goal"))
        );
        assert_eq!(page.page().state(), SubmissionState::Idle);
        assert_eq!(api.calls_to(Endpoint::CampaignGenerate), 0);
    }

    #[tokio::test]
    async fn test_generate_sends_form() {
        let api = Arc::new(FakeApi::new());
        api.reply(Endpoint::CampaignGenerate, campaign());
        let page = CampaignController::new(api.clone());
        page.set_field(CampaignField::Audience, "Founders");
        page.set_field(CampaignField::RevenueGoal, "$10k MRR");

        assert_eq!(page.generate().await, Ok(campaign()));
        let (_, body) = &api.requests()[0];
        assert_eq!(body["audience"], "Founders");
        assert_eq!(body["revenue_goal"], "$10k MRR");
        assert_eq!(body["competitor_insight"], "");
    }

    #[tokio::test]
    async fn test_missing_reply_uses_fallback() {
        let api = Arc::new(FakeApi::new());
        let page = CampaignController::new(api);
        page.set_field(CampaignField::Audience, "a");
        page.set_field(CampaignField::RevenueGoal, "b");

        let _ = page.generate().await;
        assert_eq!(
            page.page().error().map(|e| e.detail),
            Some("Campaign generation failed.".into())
        );
    }
}
