// Anomaly history view - T² samples to split normal/anomaly area series
use crate::domain::anomaly::{AnomalyChart, AnomalyRecord, AnomalySample, AnomalySummary};
use crate::domain::time_label::time_label;

/// Plotted magnitudes are capped here; the true value stays on the record.
pub const DISPLAY_CEILING: f64 = 100.0;
pub const ALERT_THRESHOLD: f64 = 55.0;

pub const NORMAL_COLOR: &str = "#16a34a";
pub const ANOMALY_COLOR: &str = "#dc2626";
pub const THRESHOLD_COLOR: &str = "#f97316";

/// Samples carry no step index; the label uses the 1-based position.
pub fn build_anomaly_series(samples: &[AnomalySample]) -> Vec<AnomalyRecord> {
    samples
        .iter()
        .enumerate()
        .map(|(position, sample)| {
            // Comparison rather than f64::min so NaN passes through as a gap.
            let capped = if sample.t2_stat > DISPLAY_CEILING {
                DISPLAY_CEILING
            } else {
                sample.t2_stat
            };
            let (normal_magnitude, anomaly_magnitude) = if sample.anomaly {
                (0.0, capped)
            } else {
                (capped, 0.0)
            };

            AnomalyRecord {
                time: time_label((position + 1) as f64),
                normal_magnitude,
                anomaly_magnitude,
                original_t2: sample.t2_stat,
            }
        })
        .collect()
}

pub fn summarize(samples: &[AnomalySample]) -> AnomalySummary {
    AnomalySummary {
        total: samples.len(),
        anomalous: samples.iter().filter(|s| s.anomaly).count(),
        latest_t2: samples.last().map(|s| s.t2_stat),
        consecutive_anomalies: samples.iter().rev().take_while(|s| s.anomaly).count(),
    }
}

pub fn build_anomaly_chart(samples: &[AnomalySample]) -> AnomalyChart {
    AnomalyChart {
        threshold: ALERT_THRESHOLD,
        ceiling: DISPLAY_CEILING,
        normal_color: NORMAL_COLOR.to_string(),
        anomaly_color: ANOMALY_COLOR.to_string(),
        threshold_color: THRESHOLD_COLOR.to_string(),
        data: build_anomaly_series(samples),
        summary: summarize(samples),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomalous_sample_capped() {
        let records = build_anomaly_series(&[AnomalySample::new(120.0, true)]);
        assert_eq!(
            records[0],
            AnomalyRecord {
                time: "3m".to_string(),
                normal_magnitude: 0.0,
                anomaly_magnitude: 100.0,
                original_t2: 120.0,
            }
        );
    }

    #[test]
    fn test_normal_sample() {
        let records = build_anomaly_series(&[AnomalySample::new(30.0, false)]);
        assert_eq!(records[0].normal_magnitude, 30.0);
        assert_eq!(records[0].anomaly_magnitude, 0.0);
        assert_eq!(records[0].original_t2, 30.0);
    }

    #[test]
    fn test_magnitudes_never_both_nonzero() {
        let samples: Vec<_> = (0..40)
            .map(|i| AnomalySample::new(i as f64 * 7.5, i % 3 == 0))
            .collect();

        for record in build_anomaly_series(&samples) {
            assert!(record.normal_magnitude == 0.0 || record.anomaly_magnitude == 0.0);
            assert!(record.normal_magnitude <= DISPLAY_CEILING);
            assert!(record.anomaly_magnitude <= DISPLAY_CEILING);
        }
    }

    #[test]
    fn test_nan_statistic_is_not_capped() {
        let records = build_anomaly_series(&[AnomalySample::new(f64::NAN, false)]);
        assert!(records[0].normal_magnitude.is_nan());
        assert_eq!(records[0].anomaly_magnitude, 0.0);
    }

    #[test]
    fn test_time_uses_one_based_position() {
        let samples = vec![AnomalySample::new(1.0, false); 21];
        let records = build_anomaly_series(&samples);
        assert_eq!(records[0].time, "3m");
        assert_eq!(records[19].time, "1h00m");
        assert_eq!(records[20].time, "1h03m");
    }

    #[test]
    fn test_chart_threshold_fixed() {
        let chart = build_anomaly_chart(&[AnomalySample::new(2.0, false)]);
        assert_eq!(chart.threshold, 55.0);
        assert_eq!(chart.ceiling, 100.0);

        let empty = build_anomaly_chart(&[]);
        assert_eq!(empty.threshold, 55.0);
        assert!(empty.data.is_empty());
    }

    #[test]
    fn test_summary_counts_tail_run() {
        let samples = [
            AnomalySample::new(80.0, true),
            AnomalySample::new(20.0, false),
            AnomalySample::new(70.0, true),
            AnomalySample::new(140.0, true),
        ];
        let summary = summarize(&samples);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.anomalous, 3);
        assert_eq!(summary.latest_t2, Some(140.0));
        assert_eq!(summary.consecutive_anomalies, 2);
        assert_eq!(summarize(&[]).latest_t2, None);
    }
}
