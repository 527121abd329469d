//! Typed entities produced by the normalizer

pub mod agent;
pub mod application;
pub mod client;
pub mod ticket;
pub mod visit;

pub use agent::{Agent, AgentDirectory};
pub use application::{Application, ApplicationStatus};
pub use client::{Client, ClientStatus};
pub use ticket::{Ticket, TicketStatus};
pub use visit::{Visit, VisitOutcome, VisitStatus};
