//! Application layer
//!
//! Assembles domain aggregations into read models and orchestrates fetching.

pub mod dashboard;
pub mod dto;
pub mod queries;

pub use dashboard::Dashboard;
pub use dto::*;
pub use queries::DashboardService;
