//! Domain services
//!
//! Pure aggregations over a normalized [`Snapshot`](crate::domain::Snapshot).
//! None of them perform I/O or keep state between calls.

pub mod counters;
pub mod load;
pub mod normalizer;
pub mod ranking;
pub mod ratio;
pub mod trend;

pub use counters::{caseload_summary, today_summary, CaseloadSummary, TodaySummary};
pub use load::{analyze_load, count_by_agent, AgentCounts, AgentLoad, AgentWorkload, LoadReport};
pub use normalizer::{normalize_snapshot, Normalized};
pub use ranking::{top_agents, TopAgent, DEFAULT_TOP_N};
pub use ratio::{global_ratios, ratios_by_agent, RatioBreakdown, RatioStat};
pub use trend::{bucket, TrendPoint, TrendSeries, UNASSIGNED_PROGRAM};
