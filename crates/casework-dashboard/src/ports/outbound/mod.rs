//! Outbound ports
//!
//! The document store is an external collaborator; implementations live in
//! `infrastructure` (and in the CLI for the HTTP gateway).

use async_trait::async_trait;

use crate::domain::{Collection, RawDocument, RawSnapshot};
use crate::error::FetchError;

/// Source of raw collection snapshots
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch every document of one collection
    async fn fetch(&self, collection: Collection) -> Result<Vec<RawDocument>, FetchError>;

    /// Fetch all collections for one dashboard cycle.
    ///
    /// Collections are fetched concurrently; the first failure fails the
    /// whole snapshot. Sources that can read everything at once override this
    /// so a cycle never mixes two versions of the data.
    async fn fetch_all(&self) -> Result<RawSnapshot, FetchError> {
        let (clients, applications, tickets, visits, agents) = tokio::try_join!(
            self.fetch(Collection::Clients),
            self.fetch(Collection::Applications),
            self.fetch(Collection::Tickets),
            self.fetch(Collection::Visits),
            self.fetch(Collection::Agents),
        )?;
        Ok(RawSnapshot { clients, applications, tickets, visits, agents })
    }
}
