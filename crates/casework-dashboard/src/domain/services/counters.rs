//! Daily and caseload counters shown on the dashboard header cards

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::snapshot::Snapshot;
use crate::domain::value_objects::utc_day;

/// Activity on a single UTC day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodaySummary {
    pub date: NaiveDate,
    /// Applications created on the day
    pub cases_handled: u64,
    /// Tickets created on the day
    pub issues: u64,
    pub new_clients: u64,
    pub visits_scheduled: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseloadSummary {
    pub allocated_clients: u64,
    pub unallocated_clients: u64,
    /// Applications in `submitted` or `request_docs`
    pub pending_applications: u64,
    pub open_tickets: u64,
}

/// Records without a timestamp are not counted for any day
pub fn today_summary(snapshot: &Snapshot, today: NaiveDate) -> TodaySummary {
    let mut undated = 0u64;
    let applications = snapshot.applications.iter().map(|a| a.created_at);
    let tickets = snapshot.tickets.iter().map(|t| t.created_at);
    let clients = snapshot.clients.iter().map(|c| c.created_at);
    let visits = snapshot.visits.iter().map(|v| v.scheduled_at);
    let summary = TodaySummary {
        date: today,
        cases_handled: on_day(applications, today, &mut undated),
        issues: on_day(tickets, today, &mut undated),
        new_clients: on_day(clients, today, &mut undated),
        visits_scheduled: on_day(visits, today, &mut undated),
    };
    if undated > 0 {
        warn!(date = %today, undated, "records without a timestamp left out of daily counts");
    }
    summary
}

fn on_day(
    instants: impl Iterator<Item = Option<DateTime<Utc>>>,
    today: NaiveDate,
    undated: &mut u64,
) -> u64 {
    let mut matching = 0;
    for instant in instants {
        match instant {
            Some(instant) if utc_day(instant) == today => matching += 1,
            Some(_) => {}
            None => *undated += 1,
        }
    }
    matching
}

pub fn caseload_summary(snapshot: &Snapshot) -> CaseloadSummary {
    let allocated = count(snapshot.clients.iter().filter(|c| c.is_allocated()));
    CaseloadSummary {
        allocated_clients: allocated,
        unallocated_clients: snapshot.clients.len() as u64 - allocated,
        pending_applications: count(
            snapshot
                .applications
                .iter()
                .filter(|a| a.status.is_pending_approval()),
        ),
        open_tickets: count(snapshot.tickets.iter().filter(|t| !t.status.is_closed())),
    }
}

fn count<T>(items: impl Iterator<Item = T>) -> u64 {
    items.count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ApplicationStatus, TicketStatus, VisitOutcome};
    use crate::domain::fixtures::*;

    #[test]
    fn test_today_counts_only_matching_day() {
        let mut late_visit = visit(None, VisitOutcome::Unset);
        late_visit.scheduled_at = Some(at(2024, 4, 2));
        let snapshot = Snapshot {
            clients: vec![
                client_on("c1", None, at(2024, 4, 2)),
                client_on("c2", None, at(2024, 4, 1)),
            ],
            applications: vec![
                application_on("c1", None, at(2024, 4, 2)),
                application_on("c2", None, at(2024, 4, 2)),
            ],
            tickets: vec![ticket_on(at(2024, 3, 2))],
            visits: vec![late_visit, visit(None, VisitOutcome::Unset)],
            ..Default::default()
        };

        let summary = today_summary(&snapshot, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(summary.new_clients, 1);
        assert_eq!(summary.cases_handled, 2);
        assert_eq!(summary.issues, 0);
        assert_eq!(summary.visits_scheduled, 1);
    }

    #[test]
    fn test_undated_records_not_counted_for_today() {
        let mut undated = client("c2", None);
        undated.created_at = None;
        let snapshot = Snapshot {
            clients: vec![client_on("c1", None, at(2024, 4, 2)), undated],
            ..Default::default()
        };

        let summary = today_summary(&snapshot, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(summary.new_clients, 1);
        assert_eq!(caseload_summary(&snapshot).unallocated_clients, 2);
    }

    #[test]
    fn test_caseload_summary() {
        let snapshot = Snapshot {
            clients: vec![client("c1", known("a")), client("c2", None), client("c3", None)],
            applications: vec![
                application("c1", ApplicationStatus::Submitted),
                application("c1", ApplicationStatus::RequestDocs),
                application("c2", ApplicationStatus::ServiceReceived),
            ],
            tickets: vec![
                ticket(None, TicketStatus::Open),
                ticket(None, TicketStatus::Closed),
                ticket(None, TicketStatus::Other("escalated".into())),
            ],
            ..Default::default()
        };

        let summary = caseload_summary(&snapshot);
        assert_eq!(summary.allocated_clients, 1);
        assert_eq!(summary.unallocated_clients, 2);
        assert_eq!(summary.pending_applications, 2);
        assert_eq!(summary.open_tickets, 2);
    }
}
