//! Agent entity and directory

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::domain::value_objects::{AgentId, AgentRef};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub display_name: String,
    pub service_areas: Vec<String>,
    pub photo_ref: Option<String>,
}

impl Agent {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: AgentId::new(id),
            display_name: display_name.into(),
            service_areas: vec![],
            photo_ref: None,
        }
    }
}

/// Lookup of agents by stable id, with display name kept as a compatibility key.
///
/// Related records historically point at agents by display name. The directory
/// resolves such references to the stable id so that aggregation is keyed by
/// id; a rename or a duplicate display name no longer splits or merges counts.
#[derive(Clone, Debug, Default)]
pub struct AgentDirectory {
    by_id: BTreeMap<AgentId, Agent>,
    by_name: HashMap<String, AgentId>,
}

impl AgentDirectory {
    pub fn new(agents: impl IntoIterator<Item = Agent>) -> Self {
        let mut directory = Self::default();
        for agent in agents {
            directory.insert(agent);
        }
        directory
    }

    fn insert(&mut self, agent: Agent) {
        if self.by_id.contains_key(&agent.id) {
            warn!(agent_id = %agent.id, "duplicate agent id, keeping first record");
            return;
        }
        match self.by_name.get(&agent.display_name) {
            Some(existing) => warn!(
                display_name = %agent.display_name,
                kept = %existing,
                ignored = %agent.id,
                "display name shared by several agents; name-based references go to the first"
            ),
            None => {
                self.by_name.insert(agent.display_name.clone(), agent.id.clone());
            }
        }
        self.by_id.insert(agent.id.clone(), agent);
    }

    /// Resolve a raw agent reference: id first, display name as fallback
    pub fn resolve(&self, reference: &str) -> AgentRef {
        let id = AgentId::new(reference);
        if self.by_id.contains_key(&id) {
            return AgentRef::Known(id);
        }
        if let Some(id) = self.by_name.get(reference) {
            debug!(reference, agent_id = %id, "agent reference resolved by display name");
            return AgentRef::Known(id.clone());
        }
        AgentRef::Unresolved(reference.to_string())
    }

    pub fn get(&self, id: &AgentId) -> Option<&Agent> {
        self.by_id.get(id)
    }

    /// Agents in id order
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.by_id.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &AgentId> {
        self.by_id.keys()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
