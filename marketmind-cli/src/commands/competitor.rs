use anyhow::Result;
use clap::Args;
use client::controllers::CompetitorController;
use shared::models::CompetitorAnalysis;
use std::fmt::Write as _;

use super::Dashboard;

#[derive(Args, Debug)]
#[command(about = "Analyze a competitor's positioning and market gaps")]
pub struct CompetitorArgs {
    /// Competitor URL or company name (e.g., hubspot.com)
    pub target: String,
}

pub async fn analyze(dashboard: &Dashboard, args: CompetitorArgs) -> Result<()> {
    let page = CompetitorController::new(dashboard.api.clone());
    let analysis = page.analyze(&args.target).await?;
    print!("{}", render_analysis(&analysis));
    Ok(())
}

pub fn render_analysis(analysis: &CompetitorAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Market Positioning (confidence: {}%)", analysis.confidence_score);
    let _ = writeln!(out, "  {}", analysis.positioning);

    for (title, items) in [
        ("Key Strengths", &analysis.strengths),
        ("Weaknesses", &analysis.weaknesses),
        ("Market Gaps", &analysis.market_gaps),
    ] {
        let _ = writeln!(out, "\n{title}");
        if items.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for item in items {
            let _ = writeln!(out, "  - {item}");
        }
    }

    let _ = writeln!(out, "\nRecommended Strategy");
    let _ = writeln!(out, "  {}", analysis.recommended_strategy);
    out
}
