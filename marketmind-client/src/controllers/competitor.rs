use super::{PageController, SubmitError};
use crate::api::MarketMindApi;
use shared::models::{ApiError, CompetitorAnalysis, CompetitorRequest};
use std::sync::Arc;

/// Shown when the analyze form is submitted without a target.
pub const MISSING_TARGET: &str = "Enter a competitor URL or company name.";

/// Competitor analysis page.
pub struct CompetitorController {
    api: Arc<dyn MarketMindApi>,
    page: PageController<CompetitorAnalysis>,
}

impl CompetitorController {
    #[must_use]
    pub fn new(api: Arc<dyn MarketMindApi>) -> Self {
        Self {
            api,
            page: PageController::new(),
        }
    }

    /// Analyzes `target`, a competitor URL or company name.
    ///
    /// # Errors
    /// A validation error for a blank target, otherwise see
    /// [`PageController::submit`].
    pub async fn analyze(&self, target: &str) -> Result<CompetitorAnalysis, SubmitError> {
        let target = target.trim();
        if target.is_empty() {
            return self.page.reject(ApiError::validation(MISSING_TARGET));
        }

        let request = CompetitorRequest {
            url: target.to_string(),
        };
        self.page
            .submit(self.api.analyze_competitor(&request))
            .await
    }

    #[must_use]
    pub const fn page(&self) -> &PageController<CompetitorAnalysis> {
        &self.page
    }
}
