//! Value Objects module
//!
//! Immutable, validated domain primitives.

pub mod timestamp;

pub use timestamp::{parse_timestamp, utc_day, TimestampError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable agent identifier (the agent's document id)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a record points at its agent after resolution against the directory
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRef {
    /// Matched a directory agent
    Known(AgentId),
    /// Named an agent the directory does not contain
    Unresolved(String),
}

impl AgentRef {
    pub fn agent_id(&self) -> Option<&AgentId> {
        match self {
            Self::Known(id) => Some(id),
            Self::Unresolved(_) => None,
        }
    }
}

/// Business identifier of a client, the key applications point at
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientKey(String);

impl ClientKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metric selectable on the trend chart
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[default]
    Clients,
    Applications,
    Tickets,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Applications => "applications",
            Self::Tickets => "tickets",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clients" => Ok(Self::Clients),
            "applications" => Ok(Self::Applications),
            "tickets" => Ok(Self::Tickets),
            other => Err(format!("unknown metric type: {}", other)),
        }
    }
}
