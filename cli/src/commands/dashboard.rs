//! Dashboard commands

use anyhow::{Context, Result};
use casework_dashboard::domain::AgentWorkload;
use casework_dashboard::{
    AgentBreakdownView, DashboardService, DashboardUseCases, DashboardView, LoadGauge, LoadView,
    MetricType, TopAgent, TrendSeries,
};
use chrono::NaiveDate;
use colored::Colorize;
use tabled::{builder::Builder, settings::Style, Tabled};

use crate::output::{heading, ratio, table, OutputFormat};

pub async fn summary(
    service: &DashboardService,
    date: NaiveDate,
    format: OutputFormat,
) -> Result<()> {
    let view = service
        .load_dashboard(date)
        .await
        .context("failed to load dashboard")?;
    format.emit(&view, render_summary)
}

pub async fn agents(service: &DashboardService, format: OutputFormat) -> Result<()> {
    let rows = service.agent_breakdown().await.context("failed to load agents")?;
    format.emit(&rows, |rows| render_agents(rows))
}

pub async fn load(service: &DashboardService, format: OutputFormat) -> Result<()> {
    let dashboard = service.build().await.context("failed to load agent workload")?;
    let view: LoadView = dashboard.load().into();
    format.emit(&view, render_load)
}

pub async fn top(service: &DashboardService, format: OutputFormat) -> Result<()> {
    let dashboard = service.build().await.context("failed to rank agents")?;
    format.emit(&dashboard.top_agents(), |agents| render_top(agents))
}

pub async fn trend(
    service: &DashboardService,
    metric: MetricType,
    format: OutputFormat,
) -> Result<()> {
    let series = service.trend(metric).await.context("failed to load trend")?;
    format.emit(&series, render_trend)
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "Agent")]
    name: String,
    #[tabled(rename = "Clients")]
    clients: u64,
    #[tabled(rename = "Applications done")]
    applications: String,
    #[tabled(rename = "Tickets closed")]
    tickets: String,
    #[tabled(rename = "Visits successful")]
    visits: String,
}

impl From<&AgentBreakdownView> for AgentRow {
    fn from(view: &AgentBreakdownView) -> Self {
        Self {
            name: view.display_name.clone(),
            clients: view.client_count,
            applications: ratio(&view.applications),
            tickets: ratio(&view.tickets),
            visits: ratio(&view.visits),
        }
    }
}

#[derive(Tabled)]
struct GaugeRow {
    #[tabled(rename = "Load")]
    family: &'static str,
    #[tabled(rename = "Average")]
    average: String,
    #[tabled(rename = "Maximum")]
    maximum: u64,
    #[tabled(rename = "Utilization")]
    utilization: String,
}

impl GaugeRow {
    fn new(family: &'static str, gauge: &LoadGauge) -> Self {
        Self {
            family,
            average: format!("{:.2}", gauge.average),
            maximum: gauge.maximum,
            utilization: format!("{:.1}%", gauge.utilization),
        }
    }
}

#[derive(Tabled)]
struct WorkloadRow {
    #[tabled(rename = "Agent")]
    name: String,
    #[tabled(rename = "Clients")]
    clients: u64,
    #[tabled(rename = "Applications")]
    applications: u64,
    #[tabled(rename = "Tickets")]
    tickets: u64,
    #[tabled(rename = "Visits")]
    visits: u64,
    #[tabled(rename = "Client share")]
    client_share: String,
}

impl From<&AgentWorkload> for WorkloadRow {
    fn from(workload: &AgentWorkload) -> Self {
        Self {
            name: workload.display_name.clone(),
            clients: workload.counts.clients,
            applications: workload.counts.applications,
            tickets: workload.counts.tickets,
            visits: workload.counts.visits,
            client_share: format!("{:.1}%", workload.client_share),
        }
    }
}

#[derive(Tabled)]
struct TopRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Agent")]
    name: String,
    #[tabled(rename = "Service areas")]
    areas: String,
    #[tabled(rename = "Clients")]
    clients: u64,
}

fn key_values<'a>(rows: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let mut builder = Builder::default();
    for (key, value) in rows {
        builder.push_record([key.to_string(), value]);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn render_summary(view: &DashboardView) -> String {
    let today = &view.today;
    let caseload = &view.caseload;
    let mut out = vec![
        heading(&format!("Today ({})", view.date())),
        key_values([
            ("Cases handled", today.cases_handled.to_string()),
            ("Issues", today.issues.to_string()),
            ("New clients", today.new_clients.to_string()),
            ("Agent visits", today.visits_scheduled.to_string()),
        ]),
        heading("Caseload"),
        key_values([
            ("Allocated clients", caseload.allocated_clients.to_string()),
            ("Unallocated clients", caseload.unallocated_clients.to_string()),
            ("Pending approval", caseload.pending_applications.to_string()),
            ("Open tickets", caseload.open_tickets.to_string()),
        ]),
        heading("Completion"),
        key_values([
            ("Applications done", ratio(&view.ratios.applications)),
            ("Tickets closed", ratio(&view.ratios.tickets)),
            ("Visits successful", ratio(&view.ratios.visits)),
        ]),
        heading("Agent load"),
        render_gauges(&view.load),
    ];
    if !view.top_agents.is_empty() {
        out.push(heading("Top agents"));
        out.push(render_top(&view.top_agents));
    }
    if view.skipped_records > 0 {
        let skipped = format!("{} malformed records skipped", view.skipped_records);
        out.push(skipped.yellow().to_string());
    }
    out.join("\n")
}

fn render_gauges(view: &LoadView) -> String {
    table([
        GaugeRow::new("Clients", &view.clients),
        GaugeRow::new("Applications", &view.applications),
        GaugeRow::new("Tickets", &view.tickets),
    ])
}

fn render_agents(rows: &[AgentBreakdownView]) -> String {
    if rows.is_empty() {
        return "No agents".dimmed().to_string();
    }
    table(rows.iter().map(AgentRow::from))
}

fn render_load(view: &LoadView) -> String {
    let mut out = vec![render_gauges(view)];
    if !view.report.per_agent.is_empty() {
        out.push(table(view.report.per_agent.iter().map(WorkloadRow::from)));
    }
    out.join("\n")
}

fn render_top(agents: &[TopAgent]) -> String {
    if agents.is_empty() {
        return "No agents with assigned clients".dimmed().to_string();
    }
    table(agents.iter().enumerate().map(|(i, agent)| TopRow {
        rank: i + 1,
        name: agent.display_name.clone(),
        areas: agent.service_areas.join(", "),
        clients: agent.client_count,
    }))
}

fn render_trend(series: &TrendSeries) -> String {
    if series.is_empty() {
        return format!("No {} recorded", series.metric).dimmed().to_string();
    }
    let categories: Vec<&str> = series.categories().into_iter().collect();
    let mut builder = Builder::default();

    let mut header = vec!["Date".to_string(), "Total".to_string()];
    header.extend(categories.iter().map(|c| c.to_string()));
    builder.push_record(header);

    for point in &series.points {
        let mut record = vec![point.date.to_string(), point.total.to_string()];
        record.extend(
            categories
                .iter()
                .map(|c| point.by_category.get(*c).copied().unwrap_or(0).to_string()),
        );
        builder.push_record(record);
    }
    builder.build().with(Style::rounded()).to_string()
}
