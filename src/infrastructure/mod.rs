// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod live_store;
pub mod sse;
pub mod stream_follower;
