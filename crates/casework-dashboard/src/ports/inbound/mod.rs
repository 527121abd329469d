//! Inbound ports (Use case traits)

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::dto::{AgentBreakdownView, DashboardView};
use crate::domain::{MetricType, TrendSeries};
use crate::error::Result;

/// Dashboard use cases consumed by the rendering layer
#[async_trait]
pub trait DashboardUseCases: Send + Sync {
    /// Fetch a fresh snapshot and assemble the full dashboard for `today`
    async fn load_dashboard(&self, today: NaiveDate) -> Result<DashboardView>;

    /// Per-agent ratios and client counts
    async fn agent_breakdown(&self) -> Result<Vec<AgentBreakdownView>>;

    /// Trend series for one metric over a fresh snapshot
    async fn trend(&self, metric: MetricType) -> Result<TrendSeries>;
}
