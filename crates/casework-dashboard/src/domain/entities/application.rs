//! Application entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ClientKey;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub client: ClientKey,
    pub status: ApplicationStatus,
    pub created_at: Option<DateTime<Utc>>,
    /// Final program if decided, otherwise the system suggestion
    pub program: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    RequestDocs,
    ServiceReceived,
    Other(String),
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "submitted" => Self::Submitted,
            "request_docs" => Self::RequestDocs,
            "service_received" => Self::ServiceReceived,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::ServiceReceived)
    }

    /// Still waiting on an agent decision
    pub fn is_pending_approval(&self) -> bool {
        matches!(self, Self::Submitted | Self::RequestDocs)
    }
}
