// Renderable chart description for one process variable
use serde::Serialize;

/// One plotted point. Range bounds repeat on every record so the renderer
/// can draw them as continuous reference lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRecord {
    pub time: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_range: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_range: Option<f64>,
}

/// Which record field a series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    Value,
    MinRange,
    MaxRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub key: SeriesKey,
    pub name: String,
    pub color: String,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleDecoration {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: String,
    pub title: TitleDecoration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub series: Vec<SeriesSpec>,
    /// `None` delegates scaling to the renderer.
    pub y_domain: Option<AxisDomain>,
    pub fraction_digits: u8,
    pub data: Vec<ChartRecord>,
}
