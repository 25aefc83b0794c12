// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::live_store::InMemoryLiveState;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub live_state: Arc<InMemoryLiveState>,
}
