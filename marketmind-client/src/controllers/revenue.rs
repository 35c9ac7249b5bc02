use super::{PageController, SubmitError};
use crate::api::MarketMindApi;
use shared::models::{GraphData, Projection, RevenueRequest, RevenueSimulation};
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

/// Header row of the exported projections file.
pub const CSV_HEADER: &str = "Month,Revenue,Growth";

/// Numeric inputs of the simulator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueField {
    Visitors,
    ConversionRate,
    AverageOrderValue,
    AdSpend,
}

impl RevenueField {
    pub const ALL: [Self; 4] = [
        Self::Visitors,
        Self::ConversionRate,
        Self::AverageOrderValue,
        Self::AdSpend,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Visitors => "visitors",
            Self::ConversionRate => "conversion_rate",
            Self::AverageOrderValue => "average_order_value",
            Self::AdSpend => "ad_spend",
        }
    }

    #[must_use]
    pub const fn get(self, form: &RevenueRequest) -> f64 {
        match self {
            Self::Visitors => form.visitors,
            Self::ConversionRate => form.conversion_rate,
            Self::AverageOrderValue => form.average_order_value,
            Self::AdSpend => form.ad_spend,
        }
    }

    const fn slot(self, form: &mut RevenueRequest) -> &mut f64 {
        match self {
            Self::Visitors => &mut form.visitors,
            Self::ConversionRate => &mut form.conversion_rate,
            Self::AverageOrderValue => &mut form.average_order_value,
            Self::AdSpend => &mut form.ad_spend,
        }
    }
}

impl FromStr for RevenueField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown revenue field: {s}"))
    }
}

/// One point of the projection chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Revenue simulator page.
pub struct RevenueController {
    api: Arc<dyn MarketMindApi>,
    form: Mutex<RevenueRequest>,
    page: PageController<RevenueSimulation>,
}

impl RevenueController {
    /// Creates the page with the default form values.
    #[must_use]
    pub fn new(api: Arc<dyn MarketMindApi>) -> Self {
        Self {
            api,
            form: Mutex::new(RevenueRequest::default()),
            page: PageController::new(),
        }
    }

    /// Sets `field` from raw input text; anything that does not parse as a
    /// finite number becomes `0`.
    pub fn set_field(&self, field: RevenueField, raw: &str) {
        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0);
        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        *field.slot(&mut form) = value;
    }

    #[must_use]
    pub fn form(&self) -> RevenueRequest {
        *self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs the simulation for the current form values.
    ///
    /// # Errors
    /// See [`PageController::submit`].
    pub async fn simulate(&self) -> Result<RevenueSimulation, SubmitError> {
        let request = self.form();
        self.page.submit(self.api.simulate_revenue(&request)).await
    }

    /// Projections of the last result as CSV, or `None` without a result.
    #[must_use]
    pub fn export_csv(&self) -> Option<String> {
        self.page
            .result()
            .map(|simulation| projections_csv(&simulation.projections))
    }

    /// Chart points of the last result; empty without a result.
    #[must_use]
    pub fn chart(&self) -> Vec<ChartPoint> {
        self.page
            .result()
            .map(|simulation| chart_points(&simulation.graph_data))
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn page(&self) -> &PageController<RevenueSimulation> {
        &self.page
    }
}

/// Renders projections as `Month,Revenue,Growth` rows joined by `\n`.
///
/// Values are written as-is, without quoting.
#[must_use]
pub fn projections_csv(projections: &[Projection]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for (index, row) in projections.iter().enumerate() {
        if index > 0 {
            csv.push('\n');
        }
        let _ = write!(csv, "{},{},{}", row.month, row.revenue, row.growth);
    }
    csv
}

/// Pairs labels with the first dataset's values.
#[must_use]
pub fn chart_points(graph: &GraphData) -> Vec<ChartPoint> {
    let Some(dataset) = graph.datasets.first() else {
        return Vec::new();
    };

    graph
        .labels
        .iter()
        .zip(&dataset.data)
        .map(|(label, value)| ChartPoint {
            label: label.clone(),
            value: *value,
        })
        .collect()
}
