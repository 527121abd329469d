//! Data Transfer Objects (DTOs)
//!
//! Read models handed to the rendering layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AgentId, AgentLoad, CaseloadSummary, LoadReport, RatioBreakdown, RatioStat, TodaySummary,
    TopAgent, TrendSeries,
};

// =============================================================================
// Views (Read Models)
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardView {
    pub today: TodaySummary,
    pub caseload: CaseloadSummary,
    pub ratios: RatioBreakdown,
    pub load: LoadView,
    pub top_agents: Vec<TopAgent>,
    pub agents: Vec<AgentBreakdownView>,
    pub trend: TrendSeries,
    /// Records dropped by the normalizer this cycle
    pub skipped_records: usize,
}

impl DashboardView {
    pub fn date(&self) -> NaiveDate {
        self.today.date
    }
}

/// Per-agent row of the agent information table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentBreakdownView {
    pub agent_id: AgentId,
    pub display_name: String,
    pub client_count: u64,
    pub applications: RatioStat,
    pub tickets: RatioStat,
    pub visits: RatioStat,
}

/// Load gauge: average, maximum, and average as a share of the maximum
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadGauge {
    pub average: f64,
    pub maximum: u64,
    pub utilization: f64,
}

impl From<AgentLoad> for LoadGauge {
    fn from(load: AgentLoad) -> Self {
        Self {
            average: load.average,
            maximum: load.maximum,
            utilization: load.utilization(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadView {
    pub clients: LoadGauge,
    pub applications: LoadGauge,
    pub tickets: LoadGauge,
    pub report: LoadReport,
}

impl From<LoadReport> for LoadView {
    fn from(report: LoadReport) -> Self {
        Self {
            clients: report.clients.into(),
            applications: report.applications.into(),
            tickets: report.tickets.into(),
            report,
        }
    }
}
