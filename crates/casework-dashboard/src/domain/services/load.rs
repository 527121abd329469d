//! Load balancer analyzer
//!
//! Per-agent caseload counts and the average / maximum across the agent
//! population.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::domain::snapshot::Snapshot;
use crate::domain::value_objects::{AgentId, AgentRef};
use crate::error::AggregateError;

/// Average and maximum of one metric across agents
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentLoad {
    pub average: f64,
    pub maximum: u64,
}

impl AgentLoad {
    /// Fails on an empty population instead of producing NaN / -inf
    pub fn try_from_counts(counts: impl IntoIterator<Item = u64>) -> Result<Self, AggregateError> {
        let mut population = 0u64;
        let mut total = 0u64;
        let mut maximum = 0u64;
        for count in counts {
            population += 1;
            total += count;
            maximum = maximum.max(count);
        }
        if population == 0 {
            return Err(AggregateError::EmptyPopulation);
        }
        Ok(Self { average: total as f64 / population as f64, maximum })
    }

    /// Empty population yields `{0, 0}`
    pub fn from_counts(counts: impl IntoIterator<Item = u64>) -> Self {
        Self::try_from_counts(counts).unwrap_or_else(|e| {
            debug!(reason = %e, "load defaults to zero");
            Self::default()
        })
    }

    /// Average as a percentage of the busiest agent
    pub fn utilization(&self) -> f64 {
        share(self.average, self.maximum)
    }
}

/// Raw counts attributed to a single agent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCounts {
    pub clients: u64,
    pub applications: u64,
    pub tickets: u64,
    pub visits: u64,
}

/// One agent's counts relative to the busiest agent per metric
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentWorkload {
    pub agent_id: AgentId,
    pub display_name: String,
    pub counts: AgentCounts,
    pub client_share: f64,
    pub application_share: f64,
    pub ticket_share: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub clients: AgentLoad,
    pub applications: AgentLoad,
    pub tickets: AgentLoad,
    pub per_agent: Vec<AgentWorkload>,
}

/// Counts for every directory agent, zero included.
///
/// Applications are attributed to the agent assigned to the owning client.
pub fn count_by_agent(snapshot: &Snapshot) -> BTreeMap<AgentId, AgentCounts> {
    let mut counts: BTreeMap<AgentId, AgentCounts> =
        snapshot.agents.ids().map(|id| (id.clone(), AgentCounts::default())).collect();
    let mut unresolved = BTreeSet::new();

    let mut bump = |agent: Option<&AgentRef>, field: fn(&mut AgentCounts) -> &mut u64| match agent {
        Some(AgentRef::Known(id)) => {
            if let Some(entry) = counts.get_mut(id) {
                *field(entry) += 1;
            }
        }
        Some(AgentRef::Unresolved(name)) => {
            unresolved.insert(name.clone());
        }
        None => {}
    };

    for client in &snapshot.clients {
        bump(client.assigned_agent.as_ref(), |c| &mut c.clients);
    }
    let owners = snapshot.client_owners();
    for app in &snapshot.applications {
        bump(Snapshot::application_owner(&owners, app), |c| &mut c.applications);
    }
    for ticket in &snapshot.tickets {
        bump(ticket.agent.as_ref(), |c| &mut c.tickets);
    }
    for visit in &snapshot.visits {
        bump(visit.agent.as_ref(), |c| &mut c.visits);
    }

    for name in &unresolved {
        warn!(
            reference = %name,
            "records reference an agent missing from the directory; excluded from load"
        );
    }
    counts
}

pub fn analyze_load(snapshot: &Snapshot) -> LoadReport {
    let counts = count_by_agent(snapshot);

    let clients = AgentLoad::from_counts(counts.values().map(|c| c.clients));
    let applications = AgentLoad::from_counts(counts.values().map(|c| c.applications));
    let tickets = AgentLoad::from_counts(counts.values().map(|c| c.tickets));

    let per_agent = counts
        .into_iter()
        .map(|(agent_id, c)| AgentWorkload {
            display_name: snapshot.display_name(&agent_id).to_string(),
            client_share: share(c.clients as f64, clients.maximum),
            application_share: share(c.applications as f64, applications.maximum),
            ticket_share: share(c.tickets as f64, tickets.maximum),
            counts: c,
            agent_id,
        })
        .collect();

    LoadReport { clients, applications, tickets, per_agent }
}

fn share(value: f64, maximum: u64) -> f64 {
    if maximum == 0 {
        0.0
    } else {
        (value / maximum as f64 * 100.0).clamp(0.0, 100.0)
    }
}
