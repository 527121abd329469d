//! Error types for the dashboard engine

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::records::Collection;

/// Per-record normalization failure. The record is skipped, the batch continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A required key field is absent or empty
    #[error("{collection} record {record_id}: missing required field `{field}`")]
    MissingField {
        collection: Collection,
        record_id: String,
        field: &'static str,
    },

    /// The collection held something other than an object
    #[error("{collection} element #{index}: expected an object, found {kind}")]
    NotAnObject {
        collection: Collection,
        index: usize,
        kind: &'static str,
    },
}

impl NormalizeError {
    /// Collection the offending record came from
    pub fn collection(&self) -> Collection {
        match self {
            Self::MissingField { collection, .. }
            | Self::NotAnObject { collection, .. } => *collection,
        }
    }
}

/// Aggregate-level conditions that the engine recovers from locally.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateError {
    #[error("agent population is empty")]
    EmptyPopulation,
}

/// Failure reported by the data-fetch collaborator.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("store returned status {status} for {collection}")]
    Status { collection: Collection, status: u16 },

    #[error("could not decode {collection}: {reason}")]
    Decode { collection: Collection, reason: String },

    #[error("could not decode export {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("collection not found: {0}")]
    NotFound(Collection),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the dashboard use cases
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The snapshot could not be fetched; no partial aggregate is produced
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
