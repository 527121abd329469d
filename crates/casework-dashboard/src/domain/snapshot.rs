//! Normalized snapshot of all collections for one dashboard cycle

use std::collections::HashMap;

use crate::domain::entities::{AgentDirectory, Application, Client, Ticket, Visit};
use crate::domain::value_objects::{AgentId, AgentRef, ClientKey};

/// Typed, immutable view of the store at fetch time
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub agents: AgentDirectory,
    pub clients: Vec<Client>,
    pub applications: Vec<Application>,
    pub tickets: Vec<Ticket>,
    pub visits: Vec<Visit>,
}

impl Snapshot {
    /// Assigned agent of every client that has one
    pub fn client_owners(&self) -> HashMap<&ClientKey, &AgentRef> {
        self.clients
            .iter()
            .filter_map(|c| c.assigned_agent.as_ref().map(|agent| (&c.key, agent)))
            .collect()
    }

    /// Agent an application is attributed to, through its owning client
    pub fn application_owner<'a>(
        owners: &HashMap<&ClientKey, &'a AgentRef>,
        application: &Application,
    ) -> Option<&'a AgentRef> {
        owners.get(&application.client).copied()
    }

    pub fn display_name<'a>(&'a self, id: &'a AgentId) -> &'a str {
        self.agents.get(id).map(|a| a.display_name.as_str()).unwrap_or(id.as_str())
    }
}
