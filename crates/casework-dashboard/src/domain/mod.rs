//! Domain module
//!
//! Raw records, typed entities, and the aggregation services.

pub mod entities;
pub mod records;
pub mod services;
pub mod snapshot;
pub mod value_objects;

#[cfg(test)]
pub(crate) mod fixtures;

pub use entities::*;
pub use records::{Collection, RawDocument, RawSnapshot};
pub use services::*;
pub use snapshot::Snapshot;
pub use value_objects::*;
