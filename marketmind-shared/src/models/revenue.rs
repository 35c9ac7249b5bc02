use serde::{Deserialize, Serialize};

/// Body of `POST /revenue/simulate`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RevenueRequest {
    /// Monthly site visitors.
    pub visitors: f64,
    /// Visitor-to-customer conversion, in percent.
    pub conversion_rate: f64,
    /// Average order value.
    pub average_order_value: f64,
    /// Monthly ad spend.
    pub ad_spend: f64,
}

impl Default for RevenueRequest {
    fn default() -> Self {
        Self {
            visitors: 10_000.0,
            conversion_rate: 2.5,
            average_order_value: 50.0,
            ad_spend: 1_000.0,
        }
    }
}

/// Current-month figures derived from the inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CurrentPerformance {
    /// Converted visitors.
    pub leads: f64,
    /// Revenue for the month.
    pub revenue: f64,
    /// Return on ad spend.
    pub roas: f64,
}

/// One projected month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    /// Month label (e.g. "Jan").
    pub month: String,
    /// Projected revenue.
    pub revenue: f64,
    /// Growth over the previous month, preformatted (e.g. "5%").
    pub growth: String,
}

/// One plotted series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    /// Series label, when the backend names it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Y values, aligned with [`GraphData::labels`].
    #[serde(default)]
    pub data: Vec<f64>,
}

/// Chart-ready projection data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphData {
    /// X axis labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Series; the first one is the projected revenue.
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

/// Full simulation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueSimulation {
    /// Figures for the current month.
    pub current_performance: CurrentPerformance,
    /// Month-by-month projection.
    #[serde(default)]
    pub projections: Vec<Projection>,
    /// Same projection shaped for charting.
    #[serde(default)]
    pub graph_data: GraphData,
}
