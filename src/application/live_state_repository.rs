// Repository trait for live process state
use crate::domain::live_state::LiveSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait LiveStateRepository: Send + Sync {
    /// Copy of the current live window, consumed by a single render pass
    async fn snapshot(&self) -> anyhow::Result<LiveSnapshot>;
}
