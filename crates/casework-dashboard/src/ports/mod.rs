//! Ports layer
//!
//! Hexagonal architecture boundaries: inbound use cases and the outbound
//! data-fetch collaborator.

pub mod inbound;
pub mod outbound;
