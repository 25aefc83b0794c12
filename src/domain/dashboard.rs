// Dashboard domain model
use super::anomaly::AnomalyChart;
use super::chart::ChartSpec;
use super::variable::OperatingRange;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at_ms: i64,
    pub steps: usize,
    pub variables: Vec<ChartSpec>,
    pub anomaly: AnomalyChart,
}

impl Dashboard {
    pub fn new(generated_at_ms: i64, steps: usize, variables: Vec<ChartSpec>, anomaly: AnomalyChart) -> Self {
        Self {
            generated_at_ms,
            steps,
            variables,
            anomaly,
        }
    }
}

/// Entry of the ordered variable listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<OperatingRange>,
    pub critical: bool,
    pub chart_url: String,
}
