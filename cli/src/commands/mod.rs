//! CLI Commands

pub mod config;
pub mod dashboard;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use casework_dashboard::infrastructure::decode_collection;
use casework_dashboard::{
    Collection, FetchError, JsonFileSnapshotSource, RawDocument, SnapshotSource,
};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

/// Snapshot source backed by the document store's HTTP API.
///
/// Each collection is read with `GET {base}/collections/{name}`; the body
/// carries the documents under a `data` key.
pub struct HttpSnapshotSource {
    pub base_url: String,
    pub api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpSnapshotSource {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(String::from),
            client: reqwest::Client::new(),
        }
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/collections/{}", self.base_url, collection)
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self, collection: Collection) -> Result<Vec<RawDocument>, FetchError> {
        let url = self.collection_url(collection);
        let mut req = self.client.get(&url);

        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        debug!(%url, "fetching collection");
        let resp = req.send().await.map_err(|e| FetchError::Transport(e.to_string()))?;
        match resp.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound(collection)),
            status if !status.is_success() => {
                return Err(FetchError::Status { collection, status: status.as_u16() })
            }
            _ => {}
        }

        let json: Value = resp.json().await.map_err(|e| FetchError::Decode {
            collection,
            reason: e.to_string(),
        })?;
        decode_envelope(collection, json)
    }
}

fn decode_envelope(collection: Collection, json: Value) -> Result<Vec<RawDocument>, FetchError> {
    let decode = |reason: String| FetchError::Decode { collection, reason };
    match json {
        Value::Object(mut body) => match body.remove("data") {
            Some(data) => decode_collection(collection, data),
            None => Err(decode("No data in response".into())),
        },
        _ => Err(decode("response is not a JSON object".into())),
    }
}

/// Where the dashboard reads its snapshot from
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    File(PathBuf),
    Store { url: String, api_key: Option<String> },
}

impl SourceSpec {
    /// A snapshot file wins over a store URL
    pub fn choose(
        snapshot: Option<PathBuf>,
        store_url: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self> {
        match (snapshot, store_url) {
            (Some(path), _) => Ok(Self::File(path)),
            (None, Some(url)) => Ok(Self::Store { url, api_key }),
            (None, None) => anyhow::bail!(
                "no data source: pass --snapshot FILE or --store-url URL \
                 (or `casework config set store_url URL`)"
            ),
        }
    }

    pub fn open(&self) -> Arc<dyn SnapshotSource> {
        match self {
            Self::File(path) => Arc::new(JsonFileSnapshotSource::new(path.clone())),
            Self::Store { url, api_key } => {
                Arc::new(HttpSnapshotSource::new(url, api_key.as_deref()))
            }
        }
    }
}
