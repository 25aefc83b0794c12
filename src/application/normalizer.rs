// Series normalizer - Raw step/value streams to display-ready chart records
use crate::domain::chart::ChartRecord;
use crate::domain::error::DashboardError;
use crate::domain::time_label::{round1, time_label};
use crate::domain::variable::VariableDescriptor;

/// Pairs each step index with its value. Mismatched lengths are an upstream
/// defect and fail instead of producing a truncated chart.
pub fn normalize(
    variable: &str,
    step_indices: &[f64],
    values: &[f64],
    descriptor: Option<&VariableDescriptor>,
) -> Result<Vec<ChartRecord>, DashboardError> {
    if step_indices.len() != values.len() {
        return Err(DashboardError::LengthMismatch {
            variable: variable.to_string(),
            expected: step_indices.len(),
            actual: values.len(),
        });
    }

    let range = descriptor.and_then(|d| d.range.as_ref());
    let min_range = range.map(|r| r.min);
    let max_range = range.map(|r| r.max);

    Ok(step_indices
        .iter()
        .zip(values)
        .map(|(&step, &value)| ChartRecord {
            time: time_label(step),
            value: round1(value),
            min_range,
            max_range,
        })
        .collect())
}
