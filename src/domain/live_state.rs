// Live process state snapshot and upstream row shape
use super::anomaly::AnomalySample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable copy of the live state taken for one render pass.
/// Every series is index-aligned with `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LiveSnapshot {
    pub time: Vec<f64>,
    pub series: BTreeMap<String, Vec<f64>>,
    pub statistics: Vec<AnomalySample>,
}

impl LiveSnapshot {
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn values(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }
}

/// One upstream point:
/// `{"time": 12, "t2_stat": 31.2, "anomaly": false, "Reactor Pressure": 2705.1, ...}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiveRow {
    pub time: f64,
    #[serde(default)]
    pub t2_stat: Option<f64>,
    #[serde(default)]
    pub anomaly: Option<bool>,
    /// Detector threshold reported upstream; the view draws its own fixed line.
    #[serde(default)]
    #[allow(dead_code)]
    pub threshold: Option<f64>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LiveRow {
    /// Numeric variable readings carried by this row.
    pub fn readings(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields
            .iter()
            .filter_map(|(name, value)| value.as_f64().map(|v| (name.as_str(), v)))
    }

    pub fn statistic(&self) -> Option<AnomalySample> {
        self.t2_stat
            .map(|t2| AnomalySample::new(t2, self.anomaly.unwrap_or(false)))
    }
}
