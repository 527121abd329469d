//! Entity builders shared by unit tests

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::entities::{
    Agent, AgentDirectory, Application, ApplicationStatus, Client, ClientStatus, Ticket,
    TicketStatus, Visit, VisitOutcome, VisitStatus,
};
use crate::domain::value_objects::{AgentId, AgentRef, ClientKey};

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn known(id: &str) -> Option<AgentRef> {
    Some(AgentRef::Known(AgentId::new(id)))
}

pub fn unresolved(name: &str) -> Option<AgentRef> {
    Some(AgentRef::Unresolved(name.to_string()))
}

/// Directory from `(id, display name)` pairs
pub fn directory(agents: &[(&str, &str)]) -> AgentDirectory {
    AgentDirectory::new(agents.iter().map(|(id, name)| Agent::new(*id, *name)))
}

pub fn client(key: &str, agent: Option<AgentRef>) -> Client {
    client_on(key, agent, at(2024, 1, 1))
}

pub fn client_on(key: &str, agent: Option<AgentRef>, created_at: DateTime<Utc>) -> Client {
    let status = if agent.is_some() { ClientStatus::Allocated } else { ClientStatus::Unallocated };
    Client {
        key: ClientKey::new(key),
        full_name: None,
        assigned_agent: agent,
        status,
        created_at: Some(created_at),
    }
}

pub fn application(client: &str, status: ApplicationStatus) -> Application {
    Application {
        id: format!("app-{}", client),
        client: ClientKey::new(client),
        status,
        created_at: Some(at(2024, 1, 1)),
        program: None,
    }
}

pub fn application_on(
    client: &str,
    program: Option<&str>,
    created_at: DateTime<Utc>,
) -> Application {
    Application {
        created_at: Some(created_at),
        program: program.map(String::from),
        ..application(client, ApplicationStatus::Submitted)
    }
}

pub fn ticket(agent: Option<AgentRef>, status: TicketStatus) -> Ticket {
    Ticket {
        id: "t".into(),
        agent,
        client: None,
        status,
        created_at: Some(at(2024, 1, 1)),
    }
}

pub fn ticket_on(created_at: DateTime<Utc>) -> Ticket {
    Ticket {
        created_at: Some(created_at),
        ..ticket(None, TicketStatus::Open)
    }
}

pub fn visit(agent: Option<AgentRef>, outcome: VisitOutcome) -> Visit {
    Visit {
        id: "v".into(),
        agent,
        client: None,
        scheduled_at: Some(at(2024, 1, 1)),
        outcome,
        status: VisitStatus::Visited,
    }
}
