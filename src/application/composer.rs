// Chart composer - Series, axis domain and title decoration for one variable
use crate::domain::chart::{
    AxisDomain, ChartRecord, ChartSpec, LineStyle, SeriesKey, SeriesSpec, TitleDecoration,
};
use crate::domain::variable::{OperatingRange, VariableDescriptor};

pub const VALUE_COLOR: &str = "#2563eb";
pub const CRITICAL_COLOR: &str = "#dc2626";
pub const WARNING_COLOR: &str = "#f97316";
pub const CRITICAL_MARKER: &str = "CRITICAL";

/// Fraction of the operating span added above and below the axis domain.
pub const DOMAIN_PADDING_RATIO: f64 = 0.5;
pub const VALUE_FRACTION_DIGITS: u8 = 1;

pub fn compose(variable: &str, records: Vec<ChartRecord>, descriptor: Option<&VariableDescriptor>) -> ChartSpec {
    let range = descriptor.and_then(|d| d.range.as_ref());

    let mut series = vec![SeriesSpec {
        key: SeriesKey::Value,
        name: variable.to_string(),
        color: VALUE_COLOR.to_string(),
        style: LineStyle::Solid,
    }];

    if let Some(range) = range {
        let color = if range.critical { CRITICAL_COLOR } else { WARNING_COLOR };
        series.push(SeriesSpec {
            key: SeriesKey::MinRange,
            name: "Min range".to_string(),
            color: color.to_string(),
            style: LineStyle::Solid,
        });
        series.push(SeriesSpec {
            key: SeriesKey::MaxRange,
            name: "Max range".to_string(),
            color: color.to_string(),
            style: LineStyle::Dashed,
        });
    }

    let y_domain = range.map(|r| axis_domain(&records, r));

    ChartSpec {
        id: variable.to_string(),
        title: decorate_title(variable, descriptor),
        unit: range.map(|r| r.unit.clone()).filter(|u| !u.is_empty()),
        series,
        y_domain,
        fraction_digits: VALUE_FRACTION_DIGITS,
        data: records,
    }
}

/// Keeps both the live data and the operating band in view, with half a
/// span of margin on each side. Non-finite values are ignored.
pub fn axis_domain(records: &[ChartRecord], range: &OperatingRange) -> AxisDomain {
    let padding = range.span() * DOMAIN_PADDING_RATIO;

    let (data_min, data_max) = records
        .iter()
        .map(|r| r.value)
        .filter(|v| v.is_finite())
        .fold((range.min, range.max), |(lo, hi), v| (lo.min(v), hi.max(v)));

    AxisDomain {
        min: data_min - padding,
        max: data_max + padding,
    }
}

fn decorate_title(variable: &str, descriptor: Option<&VariableDescriptor>) -> TitleDecoration {
    let range = descriptor.and_then(|d| d.range.as_ref());

    TitleDecoration {
        text: variable.to_string(),
        badge: descriptor.and_then(|d| d.external_tag.clone()),
        range_label: range.map(OperatingRange::label),
        critical_marker: range
            .filter(|r| r.critical)
            .map(|_| CRITICAL_MARKER.to_string()),
    }
}
