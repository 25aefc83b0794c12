// Domain layer - Pure data types and transformations
pub mod anomaly;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod live_state;
pub mod registry;
pub mod time_label;
pub mod variable;
