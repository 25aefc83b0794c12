// Application layer - Render pipeline and use cases
pub mod anomaly_view;
pub mod composer;
pub mod dashboard_service;
pub mod live_state_repository;
pub mod normalizer;
pub mod ordering;
