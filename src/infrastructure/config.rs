use crate::application::ordering::OrderingPolicy;
use crate::domain::error::DashboardError;
use crate::domain::registry::VariableRegistry;
use crate::domain::variable::VariableDescriptor;
use serde::Deserialize;

const ENV_PREFIX: &str = "TEP_DASHBOARD";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: Option<UpstreamSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub url: String,
    #[serde(default = "default_reconnect_secs")]
    pub reconnect_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct VariablesConfig {
    #[serde(default)]
    pub priority: Vec<String>,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub variables: Vec<VariableDescriptor>,
}

impl VariablesConfig {
    pub fn registry(&self) -> Result<VariableRegistry, DashboardError> {
        VariableRegistry::new(self.variables.clone())
    }

    pub fn ordering_policy(&self) -> OrderingPolicy {
        OrderingPolicy::new(self.priority.clone())
    }
}

fn default_window_size() -> usize {
    300
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_reconnect_secs() -> u64 {
    5
}

/// `config/server.*`, overridden by e.g. `TEP_DASHBOARD__SERVER__BIND`
pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_variables_config() -> anyhow::Result<VariablesConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/variables"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
