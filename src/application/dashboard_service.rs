// Dashboard service - Use case for rendering the live dashboard
use crate::application::anomaly_view::build_anomaly_chart;
use crate::application::composer::compose;
use crate::application::live_state_repository::LiveStateRepository;
use crate::application::normalizer::normalize;
use crate::application::ordering::OrderingPolicy;
use crate::domain::anomaly::AnomalyChart;
use crate::domain::chart::ChartSpec;
use crate::domain::dashboard::{Dashboard, VariableSummary};
use crate::domain::error::DashboardError;
use crate::domain::live_state::LiveSnapshot;
use crate::domain::registry::VariableRegistry;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn LiveStateRepository>,
    registry: Arc<VariableRegistry>,
    policy: OrderingPolicy,
    include: Vec<String>,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn LiveStateRepository>,
        registry: Arc<VariableRegistry>,
        policy: OrderingPolicy,
        include: Vec<String>,
    ) -> Self {
        Self {
            repository,
            registry,
            policy,
            include,
        }
    }

    pub async fn render_dashboard(&self) -> anyhow::Result<Dashboard> {
        let snapshot = self.repository.snapshot().await?;
        let charts = self.build_charts(&snapshot)?;
        let anomaly = build_anomaly_chart(&snapshot.statistics);

        tracing::debug!(
            "Rendered {} charts over {} steps, {} statistic samples",
            charts.len(),
            snapshot.time.len(),
            snapshot.statistics.len()
        );

        Ok(Dashboard::new(
            chrono::Utc::now().timestamp_millis(),
            snapshot.time.len(),
            charts,
            anomaly,
        ))
    }

    pub async fn render_variable(&self, name: &str) -> anyhow::Result<ChartSpec> {
        let snapshot = self.repository.snapshot().await?;
        Ok(self.build_chart(&snapshot, name)?)
    }

    pub async fn render_anomaly(&self) -> anyhow::Result<AnomalyChart> {
        let snapshot = self.repository.snapshot().await?;
        Ok(build_anomaly_chart(&snapshot.statistics))
    }

    /// Registered and live variables, in display order.
    pub async fn list_variables(&self) -> anyhow::Result<Vec<VariableSummary>> {
        let snapshot = self.repository.snapshot().await?;
        let names: BTreeSet<&str> = self
            .registry
            .names()
            .chain(snapshot.variable_names())
            .filter(|name| self.is_included(name))
            .collect();

        Ok(self
            .policy
            .order(names, &self.registry)
            .into_iter()
            .map(|name| {
                let descriptor = self.registry.lookup(name);
                VariableSummary {
                    name: name.to_string(),
                    tag: descriptor.and_then(|d| d.external_tag.clone()),
                    range: descriptor.and_then(|d| d.range.clone()),
                    critical: descriptor.is_some_and(|d| d.is_critical()),
                    chart_url: format!("/charts/{}", urlencoding::encode(name)),
                }
            })
            .collect())
    }

    /// Fails the whole pass on the first misaligned series.
    pub fn build_charts(&self, snapshot: &LiveSnapshot) -> Result<Vec<ChartSpec>, DashboardError> {
        let visible = snapshot.variable_names().filter(|name| self.is_included(name));

        self.policy
            .order(visible, &self.registry)
            .into_iter()
            .map(|name| self.build_chart(snapshot, name))
            .collect()
    }

    fn build_chart(&self, snapshot: &LiveSnapshot, name: &str) -> Result<ChartSpec, DashboardError> {
        let values = snapshot
            .values(name)
            .ok_or_else(|| DashboardError::UnknownVariable(name.to_string()))?;
        let descriptor = self.registry.lookup(name);

        let records = normalize(name, &snapshot.time, values, descriptor)?;
        Ok(compose(name, records, descriptor))
    }

    fn is_included(&self, name: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|n| n == name)
    }
}
