//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::domain::{MetricType, DEFAULT_TOP_N};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Size of the top-agents list
    pub top_n: usize,
    /// Trend metric shown when the dashboard first loads
    pub default_metric: MetricType,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            default_metric: MetricType::Clients,
        }
    }
}
