// In-memory live state - Bounded window of upstream rows
use crate::application::live_state_repository::LiveStateRepository;
use crate::domain::anomaly::AnomalySample;
use crate::domain::error::DashboardError;
use crate::domain::live_state::{LiveRow, LiveSnapshot};
use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use tokio::sync::{watch, RwLock};

#[derive(Debug, Default)]
struct LiveBuffer {
    time: VecDeque<f64>,
    series: BTreeMap<String, VecDeque<f64>>,
    statistics: VecDeque<AnomalySample>,
}

/// Keeps every series index-aligned with `time`: missing readings are NaN,
/// and a variable first seen mid-window is back-filled with NaN.
pub struct InMemoryLiveState {
    window_size: usize,
    buffer: RwLock<LiveBuffer>,
    version: watch::Sender<u64>,
}

impl InMemoryLiveState {
    pub fn new(window_size: usize) -> Result<Self, DashboardError> {
        if window_size == 0 {
            return Err(DashboardError::InvalidWindow);
        }

        let (version, _) = watch::channel(0);
        Ok(Self {
            window_size,
            buffer: RwLock::new(LiveBuffer::default()),
            version,
        })
    }

    /// Returns the number of steps held after the append.
    pub async fn append(&self, row: &LiveRow) -> usize {
        let steps = {
            let mut guard = self.buffer.write().await;
            let buffer = &mut *guard;

            let previous = buffer.time.len();
            buffer.time.push_back(row.time);

            for (name, value) in row.readings() {
                buffer
                    .series
                    .entry(name.to_string())
                    .or_insert_with(|| std::iter::repeat(f64::NAN).take(previous).collect())
                    .push_back(value);
            }
            for values in buffer.series.values_mut() {
                if values.len() == previous {
                    values.push_back(f64::NAN);
                }
            }

            while buffer.time.len() > self.window_size {
                buffer.time.pop_front();
                for values in buffer.series.values_mut() {
                    values.pop_front();
                }
            }
            // Variables whose readings have all aged out leave the window.
            buffer.series.retain(|_, values| values.iter().any(|v| !v.is_nan()));

            if let Some(sample) = row.statistic() {
                buffer.statistics.push_back(sample);
                if buffer.statistics.len() > self.window_size {
                    buffer.statistics.pop_front();
                }
            }

            buffer.time.len()
        };

        self.version.send_modify(|v| *v += 1);
        steps
    }

    /// Receiver that changes after every append.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}

#[async_trait]
impl LiveStateRepository for InMemoryLiveState {
    async fn snapshot(&self) -> anyhow::Result<LiveSnapshot> {
        let buffer = self.buffer.read().await;

        Ok(LiveSnapshot {
            time: buffer.time.iter().copied().collect(),
            series: buffer
                .series
                .iter()
                .map(|(name, values)| (name.clone(), values.iter().copied().collect()))
                .collect(),
            statistics: buffer.statistics.iter().copied().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(json: &str) -> LiveRow {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(InMemoryLiveState::new(0), Err(DashboardError::InvalidWindow)));
    }

    #[tokio::test]
    async fn test_series_stay_aligned() {
        let store = InMemoryLiveState::new(10).unwrap();
        store.append(&row(r#"{"time": 1, "A Feed": 0.25}"#)).await;
        store.append(&row(r#"{"time": 2, "Reactor Level": 75.0}"#)).await;
        let steps = store.append(&row(r#"{"time": 3, "A Feed": 0.26, "Reactor Level": 74.9}"#)).await;

        assert_eq!(steps, 3);
        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.time, vec![1.0, 2.0, 3.0]);

        let feed = snapshot.values("A Feed").unwrap();
        assert_eq!(feed.len(), 3);
        assert_eq!(feed[0], 0.25);
        assert!(feed[1].is_nan());
        assert_eq!(feed[2], 0.26);

        let level = snapshot.values("Reactor Level").unwrap();
        assert!(level[0].is_nan());
        assert_eq!(&level[1..], &[75.0, 74.9]);
    }

    #[tokio::test]
    async fn test_window_evicts_oldest() {
        let store = InMemoryLiveState::new(2).unwrap();
        for step in 1..=4 {
            store
                .append(&row(&format!(
                    r#"{{"time": {step}, "Stripper Level": {step}.5, "t2_stat": {step}.0, "anomaly": false}}"#
                )))
                .await;
        }

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.time, vec![3.0, 4.0]);
        assert_eq!(snapshot.values("Stripper Level").unwrap(), &[3.5, 4.5]);
        assert_eq!(
            snapshot.statistics,
            vec![AnomalySample::new(3.0, false), AnomalySample::new(4.0, false)]
        );
    }

    #[tokio::test]
    async fn test_vanished_variable_leaves_window() {
        let store = InMemoryLiveState::new(2).unwrap();
        store.append(&row(r#"{"time": 1, "A Feed": 0.25, "Reactor Level": 75.0}"#)).await;
        store.append(&row(r#"{"time": 2, "Reactor Level": 75.1}"#)).await;

        let snapshot = store.snapshot().await.unwrap();
        assert!(snapshot.values("A Feed").is_some());

        store.append(&row(r#"{"time": 3, "Reactor Level": 75.2}"#)).await;
        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.values("A Feed"), None);
        assert_eq!(snapshot.values("Reactor Level").unwrap(), &[75.1, 75.2]);
    }

    #[tokio::test]
    async fn test_series_map_bounded_by_window() {
        let store = InMemoryLiveState::new(2).unwrap();
        for i in 0..50 {
            store
                .append(&row(&format!(r#"{{"time": {i}, "Transient {i}": 1.0}}"#)))
                .await;
        }

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.time.len(), 2);
        assert_eq!(snapshot.series.len(), 2);
        assert!(snapshot.values("Transient 49").is_some());
    }

    #[tokio::test]
    async fn test_statistics_recorded_when_present() {
        let store = InMemoryLiveState::new(5).unwrap();
        store.append(&row(r#"{"time": 1, "t2_stat": 61.0, "anomaly": true}"#)).await;
        store.append(&row(r#"{"time": 2, "A Feed": 0.25}"#)).await;

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.statistics, vec![AnomalySample::new(61.0, true)]);
        assert_eq!(snapshot.time.len(), 2);
    }

    #[tokio::test]
    async fn test_append_bumps_version() {
        let store = InMemoryLiveState::new(5).unwrap();
        let mut changes = store.subscribe();
        assert_eq!(*changes.borrow_and_update(), 0);

        store.append(&row(r#"{"time": 1}"#)).await;
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), 1);
    }
}
