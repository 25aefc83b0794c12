// Upstream follower - Feeds the live store from the simulator backend's event stream
use crate::domain::live_state::LiveRow;
use crate::infrastructure::live_store::InMemoryLiveState;
use crate::infrastructure::sse::EventDecoder;
use anyhow::Context;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct StreamFollower {
    client: reqwest::Client,
    url: String,
    reconnect_delay: Duration,
    store: Arc<InMemoryLiveState>,
}

impl StreamFollower {
    pub fn new(base_url: &str, reconnect_delay: Duration, store: Arc<InMemoryLiveState>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/stream", base_url.trim_end_matches('/')),
            reconnect_delay,
            store,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        loop {
            match self.follow().await {
                Ok(()) => tracing::info!("Upstream stream {} closed", self.url),
                Err(e) => tracing::warn!("Upstream stream {} failed: {:#}", self.url, e),
            }
            tokio::time::sleep(self.reconnect_delay).await;
            tracing::debug!("Reconnecting to {}", self.url);
        }
    }

    async fn follow(&self) -> anyhow::Result<()> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "text/event-stream")
            .send()
            .await
            .context("Failed to connect to upstream stream")?;

        if !response.status().is_success() {
            anyhow::bail!("Upstream stream returned status {}", response.status());
        }
        tracing::info!("Following upstream stream {}", self.url);

        let mut body = response.bytes_stream();
        let mut decoder = EventDecoder::default();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.context("Failed to read upstream stream")?;
            for payload in decoder.push(&chunk) {
                self.apply(&payload).await;
            }
        }

        Ok(())
    }

    async fn apply(&self, payload: &str) {
        match serde_json::from_str::<LiveRow>(payload) {
            Ok(row) => {
                let steps = self.store.append(&row).await;
                tracing::debug!("Appended upstream row time={} ({} steps held)", row.time, steps);
            }
            Err(e) => tracing::warn!("Skipping malformed upstream payload: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::live_state_repository::LiveStateRepository;

    #[test]
    fn test_stream_url() {
        let store = Arc::new(InMemoryLiveState::new(4).unwrap());
        let follower = StreamFollower::new("http://127.0.0.1:8000/", Duration::from_secs(1), store);
        assert_eq!(follower.url, "http://127.0.0.1:8000/stream");
    }

    #[tokio::test]
    async fn test_apply_skips_malformed_payloads() {
        let store = Arc::new(InMemoryLiveState::new(4).unwrap());
        let follower = StreamFollower::new("http://127.0.0.1:8000", Duration::from_secs(1), store.clone());

        follower.apply(r#"{"time": 1, "Reactor Pressure": 2705.0, "t2_stat": 3.2, "anomaly": false}"#).await;
        follower.apply("not json").await;
        follower.apply(r#"{"Reactor Pressure": 2706.0}"#).await;

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.time, vec![1.0]);
        assert_eq!(snapshot.statistics.len(), 1);
    }
}
