//! Dashboard assembly over one immutable snapshot

use chrono::NaiveDate;
use tracing::info;

use crate::application::dto::{AgentBreakdownView, DashboardView};
use crate::config::DashboardConfig;
use crate::domain::{
    analyze_load, bucket, caseload_summary, count_by_agent, global_ratios, normalize_snapshot,
    ratios_by_agent, today_summary, top_agents, LoadReport, MetricType, Normalized,
    RatioBreakdown, RawSnapshot, Snapshot, TopAgent, TrendSeries,
};
use crate::error::NormalizeError;

/// Everything the dashboard shows, computed from a completed snapshot.
///
/// Holds no state besides the snapshot, so switching the trend metric is a
/// synchronous recomputation.
#[derive(Clone, Debug)]
pub struct Dashboard {
    snapshot: Snapshot,
    skipped: Vec<NormalizeError>,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(normalized: Normalized<Snapshot>, config: DashboardConfig) -> Self {
        Self {
            snapshot: normalized.value,
            skipped: normalized.skipped,
            config,
        }
    }

    pub fn from_raw(raw: &RawSnapshot, config: DashboardConfig) -> Self {
        Self::new(normalize_snapshot(raw), config)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn skipped(&self) -> &[NormalizeError] {
        &self.skipped
    }

    pub fn ratios(&self) -> RatioBreakdown {
        global_ratios(&self.snapshot)
    }

    pub fn load(&self) -> LoadReport {
        analyze_load(&self.snapshot)
    }

    pub fn top_agents(&self) -> Vec<TopAgent> {
        top_agents(&self.snapshot, self.config.top_n)
    }

    pub fn select_metric(&self, metric: MetricType) -> TrendSeries {
        bucket(&self.snapshot, metric)
    }

    /// One row per directory agent, ordered by display name
    pub fn agent_breakdown(&self) -> Vec<AgentBreakdownView> {
        let counts = count_by_agent(&self.snapshot);
        let mut rows: Vec<AgentBreakdownView> = ratios_by_agent(&self.snapshot)
            .into_iter()
            .map(|(agent_id, ratios)| AgentBreakdownView {
                display_name: self.snapshot.display_name(&agent_id).to_string(),
                client_count: counts.get(&agent_id).map(|c| c.clients).unwrap_or(0),
                applications: ratios.applications,
                tickets: ratios.tickets,
                visits: ratios.visits,
                agent_id,
            })
            .collect();
        rows.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.agent_id.cmp(&b.agent_id))
        });
        rows
    }

    pub fn view(&self, today: NaiveDate) -> DashboardView {
        let view = DashboardView {
            today: today_summary(&self.snapshot, today),
            caseload: caseload_summary(&self.snapshot),
            ratios: self.ratios(),
            load: self.load().into(),
            top_agents: self.top_agents(),
            agents: self.agent_breakdown(),
            trend: self.select_metric(self.config.default_metric),
            skipped_records: self.skipped.len(),
        };
        info!(
            date = %today,
            agents = view.agents.len(),
            skipped = view.skipped_records,
            "dashboard assembled"
        );
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawDocument;
    use serde_json::json;

    fn raw() -> RawSnapshot {
        let ts = |secs: i64| json!({ "seconds": secs, "nanoseconds": 0 });
        RawSnapshot {
            agents: vec![
                RawDocument::new("a1").with("displayName", "Alice"),
                RawDocument::new("b2").with("displayName", "Bob"),
                RawDocument::new("x9"),
            ],
            clients: vec![
                RawDocument::new("c1")
                    .with("client_id", "C1")
                    .with("assigned_agent_id", "Alice")
                    .with("created_at", ts(1704067200)),
                RawDocument::new("c2")
                    .with("client_id", "C2")
                    .with("assigned_agent_id", "b2")
                    .with("created_at", ts(1704153600)),
            ],
            applications: vec![RawDocument::new("p1")
                .with(
                    "auto_filled_form_data",
                    json!({
                        "client_id": "C1",
                        "status": "service_received",
                        "created_at": ts(1704067200)
                    }),
                )
                .with("system_suggest_program", "SNAP")],
            tickets: vec![RawDocument::new("t1")
                .with("agent_id", "Bob")
                .with("status", "closed")
                .with("created_at", ts(1704153600))],
            visits: vec![],
        }
    }

    #[test]
    fn test_select_metric_recomputes() {
        let dashboard = Dashboard::from_raw(&raw(), DashboardConfig::default());
        assert_eq!(dashboard.select_metric(MetricType::Clients).points.len(), 2);
        let apps = dashboard.select_metric(MetricType::Applications);
        assert_eq!(apps.metric, MetricType::Applications);
        assert_eq!(apps.points[0].by_category.get("SNAP"), Some(&1));
    }

    #[test]
    fn test_agent_breakdown_rows() {
        let dashboard = Dashboard::from_raw(&raw(), DashboardConfig::default());
        assert_eq!(dashboard.skipped().len(), 1);

        let rows = dashboard.agent_breakdown();
        let names: Vec<_> = rows.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(rows[0].client_count, 1);
        assert_eq!(rows[0].applications.percentage, 100.0);
        assert_eq!(rows[1].tickets.numerator, 1);
        assert_eq!(rows[1].visits.denominator, 0);
    }

    #[test]
    fn test_undated_records_still_count() {
        let raw = RawSnapshot {
            agents: vec![RawDocument::new("a1").with("displayName", "Alice")],
            clients: vec![
                RawDocument::new("c1").with("assigned_agent_id", "Alice"),
                RawDocument::new("c2")
                    .with("assigned_agent_id", "Alice")
                    .with("created_at", "2024-01-05"),
                RawDocument::new("c3")
                    .with("assigned_agent_id", "Alice")
                    .with("created_at", "soon"),
            ],
            visits: vec![RawDocument::new("v1")
                .with("agent_id", "a1")
                .with("visit_result", "successful")],
            ..Default::default()
        };

        let dashboard = Dashboard::from_raw(&raw, DashboardConfig::default());
        assert!(dashboard.skipped().is_empty());
        assert_eq!(dashboard.load().clients.maximum, 3);
        assert_eq!(dashboard.top_agents()[0].client_count, 3);
        assert_eq!(dashboard.ratios().visits.numerator, 1);
        assert_eq!(dashboard.ratios().visits.denominator, 1);

        let trend = dashboard.select_metric(MetricType::Clients);
        assert_eq!(trend.points.len(), 1);
        assert_eq!(trend.points[0].total, 1);
    }

    #[test]
    fn test_view_honours_config() {
        let config = DashboardConfig { top_n: 1, default_metric: MetricType::Tickets };
        let view =
            Dashboard::from_raw(&raw(), config).view(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(view.top_agents.len(), 1);
        assert_eq!(view.top_agents[0].display_name, "Alice");
        assert_eq!(view.trend.metric, MetricType::Tickets);
        assert_eq!(view.today.new_clients, 1);
        assert_eq!(view.today.issues, 1);
        assert_eq!(view.skipped_records, 1);
        assert_eq!(view.load.clients.maximum, 1);
        assert_eq!(view.load.clients.utilization, 100.0);
    }
}
