//! Client entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AgentRef, ClientKey};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub key: ClientKey,
    pub full_name: Option<String>,
    pub assigned_agent: Option<AgentRef>,
    pub status: ClientStatus,
    /// `None` when the store record carries no usable timestamp
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Unallocated,
    Allocated,
}

impl ClientStatus {
    /// Parse the stored status, falling back to whether an agent is assigned
    pub fn resolve(raw: Option<&str>, has_agent: bool) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("allocated") => Self::Allocated,
            Some("unallocated") => Self::Unallocated,
            _ if has_agent => Self::Allocated,
            _ => Self::Unallocated,
        }
    }
}

impl Client {
    pub fn is_allocated(&self) -> bool {
        self.status == ClientStatus::Allocated
    }
}
