//! Top-N ranker: agents with the most assigned clients

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::domain::snapshot::Snapshot;
use crate::domain::value_objects::{AgentId, AgentRef};

pub const DEFAULT_TOP_N: usize = 3;

/// Display-ready summary of a top agent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopAgent {
    /// `None` when the clients point at an agent missing from the directory
    pub agent_id: Option<AgentId>,
    pub display_name: String,
    pub service_areas: Vec<String>,
    pub photo_ref: Option<String>,
    pub client_count: u64,
}

/// Agents ordered by client count (descending), ties by display name then id.
///
/// Only agents with at least one assigned client are ranked. Ties at the cut
/// line are resolved by the tie-break order, never by widening the result.
pub fn top_agents(snapshot: &Snapshot, n: usize) -> Vec<TopAgent> {
    let mut counts: HashMap<&AgentRef, u64> = HashMap::new();
    for client in &snapshot.clients {
        if let Some(agent) = &client.assigned_agent {
            *counts.entry(agent).or_default() += 1;
        }
    }

    let mut ranked: Vec<TopAgent> = counts
        .into_iter()
        .map(|(agent, count)| describe(snapshot, agent, count))
        .collect();
    ranked.sort_by(|a, b| {
        b.client_count
            .cmp(&a.client_count)
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.agent_id.cmp(&b.agent_id))
    });
    ranked.truncate(n);
    ranked
}

fn describe(snapshot: &Snapshot, agent: &AgentRef, client_count: u64) -> TopAgent {
    match agent {
        AgentRef::Known(id) => match snapshot.agents.get(id) {
            Some(a) => TopAgent {
                agent_id: Some(a.id.clone()),
                display_name: a.display_name.clone(),
                service_areas: a.service_areas.clone(),
                photo_ref: a.photo_ref.clone(),
                client_count,
            },
            None => bare(id.as_str(), Some(id.clone()), client_count),
        },
        AgentRef::Unresolved(name) => {
            warn!(
                reference = %name,
                "ranking agent missing from the directory without display attributes"
            );
            bare(name, None, client_count)
        }
    }
}

fn bare(name: &str, agent_id: Option<AgentId>, client_count: u64) -> TopAgent {
    TopAgent {
        agent_id,
        display_name: name.to_string(),
        service_areas: vec![],
        photo_ref: None,
        client_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Agent, AgentDirectory};
    use crate::domain::fixtures::*;
    use proptest::prelude::*;

    fn snapshot_with(counts: &[(&str, usize)]) -> Snapshot {
        let mut clients = vec![];
        for (agent, n) in counts {
            for i in 0..*n {
                clients.push(client(&format!("{}-{}", agent, i), known(agent)));
            }
        }
        let agents = counts.iter().map(|(id, _)| (*id, *id)).collect::<Vec<_>>();
        Snapshot { agents: directory(&agents), clients, ..Default::default() }
    }

    fn names(ranked: &[TopAgent]) -> Vec<&str> {
        ranked.iter().map(|a| a.display_name.as_str()).collect()
    }

    #[test]
    fn test_orders_by_client_count() {
        let ranked = top_agents(&snapshot_with(&[("A", 2), ("B", 5), ("C", 1)]), DEFAULT_TOP_N);
        assert_eq!(names(&ranked), vec!["B", "A", "C"]);
        assert_eq!(ranked[0].client_count, 5);
    }

    #[test]
    fn test_cut_line_ties_broken_by_name() {
        let snapshot = snapshot_with(&[("Dee", 3), ("Ann", 3), ("Cal", 3), ("Bo", 3)]);
        let ranked = top_agents(&snapshot, 3);
        assert_eq!(names(&ranked), vec!["Ann", "Bo", "Cal"]);
    }

    #[test]
    fn test_agents_without_clients_not_ranked() {
        let mut snapshot = snapshot_with(&[("A", 1)]);
        snapshot.agents = directory(&[("A", "A"), ("Z", "Z")]);
        let ranked = top_agents(&snapshot, 3);
        assert_eq!(names(&ranked), vec!["A"]);
    }

    #[test]
    fn test_resolves_display_attributes() {
        let mut agent = Agent::new("a1", "Alice");
        agent.service_areas = vec!["Downtown".into()];
        agent.photo_ref = Some("https://img/alice.png".into());
        let snapshot = Snapshot {
            agents: AgentDirectory::new(vec![agent]),
            clients: vec![
                client("c1", known("a1")),
                client("c2", unresolved("Ghost")),
                client("c3", unresolved("Ghost")),
            ],
            ..Default::default()
        };

        let ranked = top_agents(&snapshot, 3);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].display_name, "Ghost");
        assert_eq!(ranked[0].agent_id, None);
        assert!(ranked[0].service_areas.is_empty());
        assert_eq!(ranked[1].service_areas, vec!["Downtown".to_string()]);
        assert_eq!(ranked[1].photo_ref.as_deref(), Some("https://img/alice.png"));
    }

    proptest! {
        #[test]
        fn prop_bounded_ordered_deterministic(
            counts in proptest::collection::vec(0usize..8, 0..10)
        ) {
            let owned: Vec<(String, usize)> = counts
                .iter()
                .enumerate()
                .map(|(i, n)| (format!("agent-{}", i), *n))
                .collect();
            let borrowed: Vec<(&str, usize)> =
                owned.iter().map(|(id, n)| (id.as_str(), *n)).collect();
            let snapshot = snapshot_with(&borrowed);

            let first = top_agents(&snapshot, DEFAULT_TOP_N);
            prop_assert!(first.len() <= DEFAULT_TOP_N);
            for pair in first.windows(2) {
                prop_assert!(pair[0].client_count >= pair[1].client_count);
            }
            prop_assert_eq!(first, top_agents(&snapshot, DEFAULT_TOP_N));
        }
    }
}
