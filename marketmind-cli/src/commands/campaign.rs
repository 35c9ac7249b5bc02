use anyhow::Result;
use clap::Args;
use client::controllers::{CampaignController, CampaignField};
use shared::models::Campaign;
use std::fmt::Write as _;

use super::Dashboard;

#[derive(Args, Debug)]
#[command(about = "Generate a campaign plan with ad copy")]
pub struct CampaignArgs {
    /// Target audience (e.g., "B2B SaaS founders")
    #[arg(long, short)]
    pub audience: String,

    /// Revenue goal (e.g., "$10k MRR")
    #[arg(long, short)]
    pub revenue_goal: String,

    /// Optional insight from a competitor analysis
    #[arg(long, short = 'i', default_value = "")]
    pub competitor_insight: String,
}

pub async fn generate(dashboard: &Dashboard, args: CampaignArgs) -> Result<()> {
    let page = CampaignController::new(dashboard.api.clone());
    page.set_field(CampaignField::Audience, args.audience);
    page.set_field(CampaignField::RevenueGoal, args.revenue_goal);
    page.set_field(CampaignField::CompetitorInsight, args.competitor_insight);

    let campaign = page.generate().await?;
    print!("{}", render_campaign(&campaign));
    Ok(())
}

pub fn render_campaign(campaign: &Campaign) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Recommended Platform: {}", campaign.recommended_platform);
    let _ = writeln!(out, "  {}", campaign.reasoning);

    let _ = writeln!(out, "\nAd Copy");
    for (index, ad) in campaign.ad_copies.iter().enumerate() {
        let _ = writeln!(out, "  Option {}: {}", index + 1, ad.headline);
        let _ = writeln!(out, "    {}", ad.body);
    }

    let _ = writeln!(out, "\nValue Propositions");
    for proposition in &campaign.value_propositions {
        let _ = writeln!(out, "  - {proposition}");
    }

    let _ = writeln!(out, "\nEmotional Hook: {}", campaign.emotional_hook);
    let _ = writeln!(out, "Call to Action: {}", campaign.cta);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::AdCopy;

    #[test]
    fn test_render_campaign_numbers_options() {
        let campaign = Campaign {
            recommended_platform: "LinkedIn".into(),
            reasoning: "B2B buyers".into(),
            ad_copies: vec![
                AdCopy {
                    headline: "Grow faster".into(),
                    body: "Try it free".into(),
                },
                AdCopy {
                    headline: "Stop guessing".into(),
                    body: "Data wins".into(),
                },
            ],
            value_propositions: vec!["Saves time".into()],
            emotional_hook: "FOMO".into(),
            cta: "Start now".into(),
        };

        let text = render_campaign(&campaign);
        assert!(text.starts_with("Recommended Platform: LinkedIn\n"));
        assert!(text.contains("  Option 2: Stop guessing\n    Data wins\n"));
        assert!(text.contains("  - Saves time\n"));
        assert!(text.ends_with("Call to Action: Start now\n"));
    }
}
