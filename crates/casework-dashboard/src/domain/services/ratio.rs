//! Ratio aggregator
//!
//! Completion-style ratios for applications (service received), tickets
//! (closed) and visits (successful), globally and per agent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::domain::snapshot::Snapshot;
use crate::domain::value_objects::{AgentId, AgentRef};

/// Numerator / denominator pair with its percentage
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioStat {
    pub numerator: u64,
    pub denominator: u64,
    pub percentage: f64,
}

impl RatioStat {
    /// Percentage is 0 for an empty denominator and never exceeds 100
    pub fn from_counts(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            if numerator > 0 {
                warn!(numerator, "success count without any records, treating ratio as 0%");
            }
            return Self { numerator, denominator, percentage: 0.0 };
        }
        if numerator > denominator {
            warn!(numerator, denominator, "inconsistent ratio inputs, clamping to 100%");
        }
        let percentage = (numerator as f64 / denominator as f64 * 100.0).min(100.0);
        Self { numerator, denominator, percentage }
    }

    /// Rounded percentage as shown on gauges
    pub fn rounded(&self) -> u8 {
        self.percentage.round() as u8
    }

    fn tally(&mut self, success: bool) {
        self.denominator += 1;
        if success {
            self.numerator += 1;
        }
    }

    fn finish(self) -> Self {
        Self::from_counts(self.numerator, self.denominator)
    }
}

/// One ratio per family
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioBreakdown {
    pub applications: RatioStat,
    pub tickets: RatioStat,
    pub visits: RatioStat,
}

impl RatioBreakdown {
    fn finish(self) -> Self {
        Self {
            applications: self.applications.finish(),
            tickets: self.tickets.finish(),
            visits: self.visits.finish(),
        }
    }
}

/// Ratios over every record in the snapshot
pub fn global_ratios(snapshot: &Snapshot) -> RatioBreakdown {
    let mut acc = RatioBreakdown::default();
    for app in &snapshot.applications {
        acc.applications.tally(app.status.is_completed());
    }
    for ticket in &snapshot.tickets {
        acc.tickets.tally(ticket.status.is_closed());
    }
    for visit in &snapshot.visits {
        acc.visits.tally(visit.is_successful());
    }
    acc.finish()
}

/// Ratios keyed by agent; every directory agent gets an entry.
///
/// Applications are attributed through the owning client's assigned agent.
/// Records pointing at agents outside the directory are not attributed.
pub fn ratios_by_agent(snapshot: &Snapshot) -> BTreeMap<AgentId, RatioBreakdown> {
    let mut acc: BTreeMap<AgentId, RatioBreakdown> = snapshot
        .agents
        .ids()
        .map(|id| (id.clone(), RatioBreakdown::default()))
        .collect();

    let owners = snapshot.client_owners();
    for app in &snapshot.applications {
        let owner = Snapshot::application_owner(&owners, app);
        if let Some(entry) = owner.and_then(|r| slot(&mut acc, r)) {
            entry.applications.tally(app.status.is_completed());
        }
    }
    for ticket in &snapshot.tickets {
        if let Some(entry) = ticket.agent.as_ref().and_then(|r| slot(&mut acc, r)) {
            entry.tickets.tally(ticket.status.is_closed());
        }
    }
    for visit in &snapshot.visits {
        if let Some(entry) = visit.agent.as_ref().and_then(|r| slot(&mut acc, r)) {
            entry.visits.tally(visit.is_successful());
        }
    }

    acc.into_iter().map(|(id, b)| (id, b.finish())).collect()
}

fn slot<'a>(
    acc: &'a mut BTreeMap<AgentId, RatioBreakdown>,
    agent: &AgentRef,
) -> Option<&'a mut RatioBreakdown> {
    agent.agent_id().and_then(|id| acc.get_mut(id))
}
