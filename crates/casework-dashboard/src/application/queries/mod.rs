//! Query handlers
//!
//! Application service that fetches a snapshot through the outbound port and
//! hands it to the pure aggregation layer.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, error};

use crate::application::dashboard::Dashboard;
use crate::application::dto::{AgentBreakdownView, DashboardView};
use crate::config::DashboardConfig;
use crate::domain::{MetricType, RawSnapshot, TrendSeries};
use crate::error::{DashboardError, Result};
use crate::ports::inbound::DashboardUseCases;
use crate::ports::outbound::SnapshotSource;

/// Dashboard application service
pub struct DashboardService {
    source: Arc<dyn SnapshotSource>,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(source: Arc<dyn SnapshotSource>, config: DashboardConfig) -> Self {
        Self { source, config }
    }

    /// Fetch all collections. Any failure discards the whole snapshot;
    /// retrying is the caller's decision.
    pub async fn fetch_snapshot(&self) -> Result<RawSnapshot> {
        let raw = self.source.fetch_all().await.map_err(|e| {
            error!(error = %e, "snapshot fetch failed, no data this cycle");
            DashboardError::Upstream(e)
        })?;
        debug!(records = raw.total_records(), "snapshot fetched");
        Ok(raw)
    }

    /// Fetch and assemble a [`Dashboard`] that can be queried repeatedly
    pub async fn build(&self) -> Result<Dashboard> {
        let raw = self.fetch_snapshot().await?;
        Ok(Dashboard::from_raw(&raw, self.config.clone()))
    }
}

#[async_trait]
impl DashboardUseCases for DashboardService {
    async fn load_dashboard(&self, today: NaiveDate) -> Result<DashboardView> {
        Ok(self.build().await?.view(today))
    }

    async fn agent_breakdown(&self) -> Result<Vec<AgentBreakdownView>> {
        Ok(self.build().await?.agent_breakdown())
    }

    async fn trend(&self, metric: MetricType) -> Result<TrendSeries> {
        Ok(self.build().await?.select_metric(metric))
    }
}
