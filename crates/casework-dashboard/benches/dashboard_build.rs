//! Dashboard build benchmark over a synthetic snapshot

use casework_dashboard::{Dashboard, DashboardConfig, MetricType, RawDocument, RawSnapshot};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn synthetic(agents: usize, clients_per_agent: usize) -> RawSnapshot {
    let mut raw = RawSnapshot::default();
    for a in 0..agents {
        raw.agents.push(
            RawDocument::new(format!("agent-{}", a)).with("displayName", format!("Agent {}", a)),
        );
        for c in 0..clients_per_agent {
            let client_id = format!("client-{}-{}", a, c);
            let day = 1_704_067_200i64 + ((a * clients_per_agent + c) % 90) as i64 * 86_400;
            let created = json!({ "seconds": day, "nanoseconds": 0 });
            raw.clients.push(
                RawDocument::new(client_id.clone())
                    .with("assigned_agent_id", format!("Agent {}", a))
                    .with("created_at", created.clone()),
            );
            raw.applications.push(
                RawDocument::new(format!("app-{}", client_id))
                    .with(
                        "auto_filled_form_data",
                        json!({
                            "client_id": client_id,
                            "status": if c % 3 == 0 { "service_received" } else { "submitted" },
                            "created_at": created
                        }),
                    )
                    .with("system_suggest_program", if c % 2 == 0 { "SNAP" } else { "WIC" }),
            );
            raw.tickets.push(
                RawDocument::new(format!("ticket-{}", client_id))
                    .with("agent_id", format!("agent-{}", a))
                    .with("status", if c % 2 == 0 { "closed" } else { "open" })
                    .with("created_at", created),
            );
        }
    }
    raw
}

fn dashboard_build_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard_build");
    let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

    for agents in [10usize, 100, 500].iter() {
        let raw = synthetic(*agents, 20);
        group.bench_with_input(BenchmarkId::from_parameter(agents), &raw, |b, raw| {
            b.iter(|| {
                let dashboard = Dashboard::from_raw(black_box(raw), DashboardConfig::default());
                black_box(dashboard.view(today))
            })
        });
    }

    group.finish();
}

fn select_metric_benchmark(c: &mut Criterion) {
    let dashboard = Dashboard::from_raw(&synthetic(100, 20), DashboardConfig::default());
    c.bench_function("select_metric_applications", |b| {
        b.iter(|| black_box(dashboard.select_metric(MetricType::Applications)))
    });
}

criterion_group!(benches, dashboard_build_benchmark, select_metric_benchmark);
criterion_main!(benches);
