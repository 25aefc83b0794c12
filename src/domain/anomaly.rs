// Anomaly statistic domain models
use serde::{Deserialize, Serialize};

/// One T² sample as published by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalySample {
    pub t2_stat: f64,
    #[serde(default)]
    pub anomaly: bool,
}

impl AnomalySample {
    pub fn new(t2_stat: f64, anomaly: bool) -> Self {
        Self { t2_stat, anomaly }
    }
}

/// At most one of the two magnitudes is nonzero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRecord {
    pub time: String,
    pub normal_magnitude: f64,
    pub anomaly_magnitude: f64,
    pub original_t2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalySummary {
    pub total: usize,
    pub anomalous: usize,
    pub latest_t2: Option<f64>,
    pub consecutive_anomalies: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyChart {
    pub threshold: f64,
    pub ceiling: f64,
    pub normal_color: String,
    pub anomaly_color: String,
    pub threshold_color: String,
    pub data: Vec<AnomalyRecord>,
    pub summary: AnomalySummary,
}
