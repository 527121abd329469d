//! Infrastructure layer
//!
//! Concrete snapshot sources.

pub mod file;
pub mod memory;

pub use file::JsonFileSnapshotSource;
pub use memory::InMemorySnapshotSource;

use serde_json::Value;

use crate::domain::{Collection, RawDocument};
use crate::error::FetchError;

/// Decode one collection element by element.
///
/// Only a collection that is not an array fails; malformed elements are
/// kept for the normalizer to report.
pub fn decode_collection(
    collection: Collection,
    docs: Value,
) -> Result<Vec<RawDocument>, FetchError> {
    let items: Vec<Value> = serde_json::from_value(docs).map_err(|e| FetchError::Decode {
        collection,
        reason: e.to_string(),
    })?;
    Ok(items.into_iter().map(RawDocument::from).collect())
}
