use anyhow::{Context, Result};
use clap::Args;
use client::controllers::{RevenueController, RevenueField, chart_points};
use shared::models::RevenueSimulation;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::Dashboard;

const BAR_WIDTH: f64 = 40.0;

#[derive(Args, Debug)]
#[command(about = "Simulate revenue and project the next months")]
pub struct RevenueArgs {
    /// Monthly visitors (default: 10000)
    #[arg(long)]
    pub visitors: Option<String>,

    /// Conversion rate in percent (default: 2.5)
    #[arg(long)]
    pub conversion_rate: Option<String>,

    /// Average order value (default: 50)
    #[arg(long)]
    pub average_order_value: Option<String>,

    /// Monthly ad spend (default: 1000)
    #[arg(long)]
    pub ad_spend: Option<String>,

    /// Write the projections as CSV to this path
    #[arg(long, short)]
    pub export: Option<PathBuf>,
}

impl RevenueArgs {
    fn overrides(&self) -> [(RevenueField, Option<&str>); 4] {
        [
            (RevenueField::Visitors, self.visitors.as_deref()),
            (RevenueField::ConversionRate, self.conversion_rate.as_deref()),
            (RevenueField::AverageOrderValue, self.average_order_value.as_deref()),
            (RevenueField::AdSpend, self.ad_spend.as_deref()),
        ]
    }
}

pub async fn simulate(dashboard: &Dashboard, args: RevenueArgs) -> Result<()> {
    let page = RevenueController::new(dashboard.api.clone());
    for (field, raw) in args.overrides() {
        if let Some(raw) = raw {
            page.set_field(field, raw);
        }
    }

    let simulation = page.simulate().await?;
    print!("{}", render_simulation(&simulation));

    if let Some(path) = &args.export {
        export(&page, path)?;
        println!("\nProjections exported to {}", path.display());
    }
    Ok(())
}

/// Writes the controller's CSV export to `path`.
pub fn export(page: &RevenueController, path: &Path) -> Result<()> {
    let csv = page
        .export_csv()
        .context("nothing to export; run a simulation first")?;
    fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))
}

pub fn render_simulation(simulation: &RevenueSimulation) -> String {
    let current = &simulation.current_performance;
    let mut out = String::new();
    let _ = writeln!(out, "Est. Leads:   {}", current.leads);
    let _ = writeln!(out, "Est. Revenue: ${}", current.revenue);
    let _ = writeln!(out, "ROAS:         {}x", current.roas);

    let _ = writeln!(out, "\n3-Month Revenue Projection");
    let _ = writeln!(out, "{:<10} {:>14} {:>8}", "Month", "Proj. Revenue", "Growth");
    for row in &simulation.projections {
        let _ = writeln!(
            out,
            "{:<10} {:>14} {:>8}",
            row.month,
            format!("${}", row.revenue),
            row.growth
        );
    }

    let points = chart_points(&simulation.graph_data);
    let peak = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    if peak > 0.0 {
        let _ = writeln!(out);
        for point in &points {
            let bars = (point.value.max(0.0) / peak * BAR_WIDTH).round();
            let _ = writeln!(
                out,
                "{:<10} {}",
                point.label,
                "#".repeat(bars_len(bars))
            );
        }
    }
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bars_len(bars: f64) -> usize {
    bars.clamp(0.0, BAR_WIDTH) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CurrentPerformance, Dataset, GraphData, Projection};

    fn simulation() -> RevenueSimulation {
        RevenueSimulation {
            current_performance: CurrentPerformance {
                leads: 250.0,
                revenue: 12_500.0,
                roas: 12.5,
            },
            projections: vec![Projection {
                month: "Jan".into(),
                revenue: 1000.0,
                growth: "5%".into(),
            }],
            graph_data: GraphData {
                labels: vec!["Jan".into(), "Feb".into()],
                datasets: vec![Dataset {
                    label: None,
                    data: vec![1000.0, 500.0],
                }],
            },
        }
    }

    #[test]
    fn test_render_simulation() {
        let text = render_simulation(&simulation());
        assert!(text.contains("Est. Revenue: $12500\n"));
        assert!(text.contains("ROAS:         12.5x\n"));
        assert!(text.contains("Jan                 $1000       5%\n"));
        assert!(text.contains(&format!("Jan        {}\n", "#".repeat(40))));
        assert!(text.contains(&format!("Feb        {}\n", "#".repeat(20))));
    }

    #[test]
    fn test_render_without_chart_data() {
        let mut simulation = simulation();
        simulation.graph_data = GraphData::default();
        assert!(!render_simulation(&simulation).contains('#'));
    }

    #[test]
    fn test_overrides_keep_raw_text() {
        let args = RevenueArgs {
            visitors: Some("abc".into()),
            conversion_rate: None,
            average_order_value: None,
            ad_spend: Some("2000".into()),
            export: None,
        };
        let overrides = args.overrides();
        assert_eq!(overrides[0], (RevenueField::Visitors, Some("abc")));
        assert_eq!(overrides[1], (RevenueField::ConversionRate, None));
        assert_eq!(overrides[3], (RevenueField::AdSpend, Some("2000")));
    }
}
