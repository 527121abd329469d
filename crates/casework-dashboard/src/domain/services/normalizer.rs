//! Entity normalizer
//!
//! Converts raw store documents into typed entities. A record missing a
//! required key field (agent display name, client identifier) is skipped and
//! reported; the batch always completes. Timestamps are optional: an undated
//! record still counts toward totals and is only left out of day buckets.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    Agent, AgentDirectory, Application, ApplicationStatus, Client, ClientStatus, Ticket,
    TicketStatus, Visit, VisitOutcome, VisitStatus,
};
use crate::domain::records::{Collection, RawDocument, RawSnapshot};
use crate::domain::snapshot::Snapshot;
use crate::domain::value_objects::{parse_timestamp, AgentId, ClientKey};
use crate::error::NormalizeError;

/// Normalized output plus the records that had to be dropped
#[derive(Clone, Debug, Default)]
pub struct Normalized<T> {
    pub value: T,
    pub skipped: Vec<NormalizeError>,
}

impl<T> Normalized<T> {
    pub fn skipped_in(&self, collection: Collection) -> usize {
        self.skipped.iter().filter(|e| e.collection() == collection).count()
    }
}

/// Normalize a full raw snapshot. Agents go first so that every other
/// collection can resolve its agent references against the directory.
pub fn normalize_snapshot(raw: &RawSnapshot) -> Normalized<Snapshot> {
    let mut skipped = Vec::new();

    let agents = AgentDirectory::new(collect(
        Collection::Agents,
        &raw.agents,
        normalize_agent,
        &mut skipped,
    ));
    let clients = collect(
        Collection::Clients,
        &raw.clients,
        |d| normalize_client(d, &agents),
        &mut skipped,
    );
    let applications = collect(
        Collection::Applications,
        &raw.applications,
        normalize_application,
        &mut skipped,
    );
    let tickets = collect(
        Collection::Tickets,
        &raw.tickets,
        |d| normalize_ticket(d, &agents),
        &mut skipped,
    );
    let visits = collect(
        Collection::Visits,
        &raw.visits,
        |d| normalize_visit(d, &agents),
        &mut skipped,
    );

    info!(
        agents = agents.len(),
        clients = clients.len(),
        applications = applications.len(),
        tickets = tickets.len(),
        visits = visits.len(),
        skipped = skipped.len(),
        "snapshot normalized"
    );

    Normalized {
        value: Snapshot { agents, clients, applications, tickets, visits },
        skipped,
    }
}

fn collect<T>(
    collection: Collection,
    docs: &[RawDocument],
    convert: impl Fn(&RawDocument) -> Result<T, NormalizeError>,
    skipped: &mut Vec<NormalizeError>,
) -> Vec<T> {
    let mut out = Vec::with_capacity(docs.len());
    for (index, doc) in docs.iter().enumerate() {
        let converted = match doc.malformed {
            Some(kind) => Err(NormalizeError::NotAnObject { collection, index, kind }),
            None => convert(doc),
        };
        match converted {
            Ok(entity) => out.push(entity),
            Err(e) => {
                warn!(error = %e, "skipping record");
                skipped.push(e);
            }
        }
    }
    out
}

pub fn normalize_agent(doc: &RawDocument) -> Result<Agent, NormalizeError> {
    let display_name = doc
        .text(&["displayName", "display_name"])
        .ok_or_else(|| missing(Collection::Agents, doc, "displayName"))?;
    let id = doc.id.clone().unwrap_or_else(|| display_name.clone());

    Ok(Agent {
        id: AgentId::new(id),
        display_name,
        service_areas: string_list(doc.first_of(&[
            "service_areas",
            "serviceArea",
            "service_area",
        ])),
        photo_ref: doc.text(&["photoURL", "photo_url"]),
    })
}

pub fn normalize_client(
    doc: &RawDocument,
    agents: &AgentDirectory,
) -> Result<Client, NormalizeError> {
    let key = doc
        .text(&["client_id"])
        .or_else(|| doc.id.clone())
        .ok_or_else(|| missing(Collection::Clients, doc, "client_id"))?;
    let created_at = optional_timestamp(doc, Collection::Clients, &["created_at"]);
    let assigned_agent = doc.text(&["assigned_agent_id"]).map(|r| agents.resolve(&r));
    let status =
        ClientStatus::resolve(doc.text(&["status"]).as_deref(), assigned_agent.is_some());

    Ok(Client {
        key: ClientKey::new(key),
        full_name: doc.text(&["full_name"]),
        assigned_agent,
        status,
        created_at,
    })
}

pub fn normalize_application(doc: &RawDocument) -> Result<Application, NormalizeError> {
    let client = doc
        .text(&["auto_filled_form_data.client_id", "client_id"])
        .ok_or_else(|| missing(Collection::Applications, doc, "client_id"))?;
    let created_at = optional_timestamp(
        doc,
        Collection::Applications,
        &["auto_filled_form_data.created_at", "created_at"],
    );
    let status = doc
        .text(&["auto_filled_form_data.status", "status"])
        .map(|s| ApplicationStatus::parse(&s))
        .unwrap_or_default();

    Ok(Application {
        id: doc.record_id().to_string(),
        client: ClientKey::new(client),
        status,
        created_at,
        program: doc.text(&["final_program_name", "system_suggest_program"]),
    })
}

pub fn normalize_ticket(
    doc: &RawDocument,
    agents: &AgentDirectory,
) -> Result<Ticket, NormalizeError> {
    let created_at = optional_timestamp(doc, Collection::Tickets, &["created_at"]);
    let status = doc
        .text(&["status"])
        .map(|s| TicketStatus::parse(&s))
        .unwrap_or_default();

    Ok(Ticket {
        id: doc.record_id().to_string(),
        agent: doc.text(&["agent_id"]).map(|r| agents.resolve(&r)),
        client: doc.text(&["client_id"]).map(ClientKey::new),
        status,
        created_at,
    })
}

pub fn normalize_visit(
    doc: &RawDocument,
    agents: &AgentDirectory,
) -> Result<Visit, NormalizeError> {
    let scheduled_at = optional_timestamp(doc, Collection::Visits, &["scheduled_date"]);

    Ok(Visit {
        id: doc.record_id().to_string(),
        agent: doc.text(&["agent_id"]).map(|r| agents.resolve(&r)),
        client: doc.text(&["client_id"]).map(ClientKey::new),
        scheduled_at,
        outcome: VisitOutcome::parse(doc.text(&["visit_result"]).as_deref()),
        status: VisitStatus::parse(doc.text(&["status"]).as_deref()),
    })
}

/// Undated records stay in totals, so an unreadable timestamp is not fatal
fn optional_timestamp(
    doc: &RawDocument,
    collection: Collection,
    paths: &[&str],
) -> Option<DateTime<Utc>> {
    let value = doc.first_of(paths)?;
    match parse_timestamp(value) {
        Ok(instant) => Some(instant),
        Err(e) => {
            debug!(%collection, record_id = doc.record_id(), error = %e, "ignoring timestamp");
            None
        }
    }
}

fn missing(collection: Collection, doc: &RawDocument, field: &'static str) -> NormalizeError {
    NormalizeError::MissingField {
        collection,
        record_id: doc.record_id().to_string(),
        field,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => vec![],
    }
}
