//! Casework Dashboard Metrics Engine
//!
//! Derives the statistics shown on the casework admin console dashboard from
//! raw snapshots of the document store: completion ratios, agent load, the
//! top agents by caseload, daily counters, and date-bucketed trend series.
//!
//! ## Architecture
//!
//! - **Domain Layer**: raw records, typed entities, pure aggregation services
//! - **Application Layer**: dashboard assembly, read models, fetch orchestration
//! - **Ports Layer**: use-case trait and the snapshot-source collaborator
//! - **Infrastructure Layer**: in-memory and JSON-export snapshot sources
//!
//! ## Aggregations
//!
//! - **Normalizer**: raw documents to typed entities, skipping malformed records
//! - **Ratios**: applications completed, tickets closed, visits successful
//! - **Load**: per-agent counts with average and maximum
//! - **Ranking**: top agents by assigned clients
//! - **Trend**: per-day series, split by program for applications
//!
//! Every aggregation is a pure function over an immutable [`Snapshot`];
//! calendar days are always taken in UTC.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use application::{
    AgentBreakdownView, Dashboard, DashboardService, DashboardView, LoadGauge, LoadView,
};
pub use config::DashboardConfig;
pub use domain::{
    AgentId, AgentLoad, AgentRef, Collection, MetricType, RatioBreakdown, RatioStat, RawDocument,
    RawSnapshot, Snapshot, TopAgent, TrendPoint, TrendSeries,
};
pub use error::{AggregateError, DashboardError, FetchError, NormalizeError, Result};
pub use infrastructure::{InMemorySnapshotSource, JsonFileSnapshotSource};
pub use ports::inbound::DashboardUseCases;
pub use ports::outbound::SnapshotSource;
