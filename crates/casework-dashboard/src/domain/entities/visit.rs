//! Visit entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AgentRef, ClientKey};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: String,
    pub agent: Option<AgentRef>,
    pub client: Option<ClientKey>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub outcome: VisitOutcome,
    pub status: VisitStatus,
}

impl Visit {
    pub fn is_successful(&self) -> bool {
        self.outcome == VisitOutcome::Successful
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitOutcome {
    Successful,
    Unsuccessful,
    #[default]
    Unset,
}

impl VisitOutcome {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("successful") => Self::Successful,
            Some("unsuccessful") => Self::Unsuccessful,
            _ => Self::Unset,
        }
    }
}

/// Scheduling workflow state of a visit
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    #[default]
    Proposed,
    Confirmed,
    Rejected,
    Visited,
    Other(String),
}

impl VisitStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else { return Self::default() };
        match raw.trim().to_ascii_lowercase().as_str() {
            "proposed" => Self::Proposed,
            "confirmed" => Self::Confirmed,
            "rejected" => Self::Rejected,
            "visited" => Self::Visited,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}
