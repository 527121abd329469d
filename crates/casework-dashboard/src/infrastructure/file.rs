//! Snapshot source backed by a JSON export of the store
//!
//! The export is an object keyed by collection name:
//! `{ "Clients": [...], "Applications": [...], ... }`. A full snapshot reads
//! and parses the file once, so each dashboard cycle sees one version of the
//! export even if it is rewritten meanwhile.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{Collection, RawDocument, RawSnapshot};
use crate::error::FetchError;
use crate::infrastructure::decode_collection;
use crate::ports::outbound::SnapshotSource;

pub struct JsonFileSnapshotSource {
    path: PathBuf,
}

impl JsonFileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_export(&self) -> Result<Map<String, Value>, FetchError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content).map_err(|e| FetchError::Export {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn take(
        &self,
        export: &mut Map<String, Value>,
        collection: Collection,
    ) -> Result<Vec<RawDocument>, FetchError> {
        match export.remove(collection.as_str()) {
            Some(docs) => decode_collection(collection, docs),
            None => {
                debug!(%collection, path = %self.path.display(), "collection absent from export");
                Ok(vec![])
            }
        }
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSnapshotSource {
    async fn fetch(&self, collection: Collection) -> Result<Vec<RawDocument>, FetchError> {
        let mut export = self.read_export().await?;
        self.take(&mut export, collection)
    }

    async fn fetch_all(&self) -> Result<RawSnapshot, FetchError> {
        let mut export = self.read_export().await?;
        Ok(RawSnapshot {
            clients: self.take(&mut export, Collection::Clients)?,
            applications: self.take(&mut export, Collection::Applications)?,
            tickets: self.take(&mut export, Collection::Tickets)?,
            visits: self.take(&mut export, Collection::Visits)?,
            agents: self.take(&mut export, Collection::Agents)?,
        })
    }
}
