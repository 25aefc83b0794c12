// Variable metadata domain model
use serde::{Deserialize, Serialize};

/// Nominal operating band of a process variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
    #[serde(default)]
    pub critical: bool,
}

impl OperatingRange {
    pub fn new(min: f64, max: f64, unit: impl Into<String>, critical: bool) -> Self {
        Self {
            min,
            max,
            unit: unit.into(),
            critical,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// "2650-2800 kPa"
    pub fn label(&self) -> String {
        if self.unit.is_empty() {
            format!("{}-{}", self.min, self.max)
        } else {
            format!("{}-{} {}", self.min, self.max, self.unit)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(default, rename = "tag")]
    pub external_tag: Option<String>,
    #[serde(default)]
    pub range: Option<OperatingRange>,
}

impl VariableDescriptor {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            external_tag: None,
            range: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.external_tag = Some(tag.into());
        self
    }

    pub fn with_range(mut self, range: OperatingRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn is_critical(&self) -> bool {
        self.range.as_ref().is_some_and(|r| r.critical)
    }
}
