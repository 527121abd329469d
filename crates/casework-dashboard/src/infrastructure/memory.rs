//! In-memory snapshot source for tests and demos

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{Collection, RawDocument, RawSnapshot};
use crate::error::FetchError;
use crate::ports::outbound::SnapshotSource;

/// In-memory document store
#[derive(Default)]
pub struct InMemorySnapshotSource {
    collections: RwLock<HashMap<Collection, Vec<RawDocument>>>,
    failing: RwLock<HashSet<Collection>>,
}

impl InMemorySnapshotSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: RawSnapshot) -> Self {
        let source = Self::new();
        source.insert(Collection::Clients, snapshot.clients);
        source.insert(Collection::Applications, snapshot.applications);
        source.insert(Collection::Tickets, snapshot.tickets);
        source.insert(Collection::Visits, snapshot.visits);
        source.insert(Collection::Agents, snapshot.agents);
        source
    }

    /// Replace the documents of a collection
    pub fn insert(&self, collection: Collection, docs: Vec<RawDocument>) {
        let mut collections = self.collections.write().unwrap_or_else(|e| e.into_inner());
        collections.insert(collection, docs);
    }

    /// Make every fetch of `collection` fail until [`recover`](Self::recover)
    pub fn fail(&self, collection: Collection) {
        self.failing.write().unwrap_or_else(|e| e.into_inner()).insert(collection);
    }

    pub fn recover(&self, collection: Collection) {
        self.failing.write().unwrap_or_else(|e| e.into_inner()).remove(&collection);
    }
}

#[async_trait]
impl SnapshotSource for InMemorySnapshotSource {
    async fn fetch(&self, collection: Collection) -> Result<Vec<RawDocument>, FetchError> {
        if self.failing.read().unwrap_or_else(|e| e.into_inner()).contains(&collection) {
            return Err(FetchError::Unavailable(format!("{} is failing", collection)));
        }
        let collections = self.collections.read().unwrap_or_else(|e| e.into_inner());
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }
}
