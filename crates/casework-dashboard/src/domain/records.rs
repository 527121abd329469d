//! Raw documents as delivered by the document store
//!
//! Records are heterogeneous: the store enforces no schema, so every field is
//! read leniently and only the normalizer decides what is required.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Named collections the dashboard reads
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    Clients,
    Applications,
    Tickets,
    Visits,
    Agents,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Clients,
        Collection::Applications,
        Collection::Tickets,
        Collection::Visits,
        Collection::Agents,
    ];

    /// Collection name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "Clients",
            Self::Applications => "Applications",
            Self::Tickets => "Tickets",
            Self::Visits => "Visits",
            Self::Agents => "Agents",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown collection: {}", s))
    }
}

/// A single untyped document.
///
/// Deserialization never fails: a numeric `id` is kept as its decimal text,
/// and an element that is not an object becomes an empty document flagged
/// with [`malformed`](Self::malformed) so the normalizer can report it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RawDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// JSON kind of an element that was not an object
    #[serde(skip)]
    pub malformed: Option<&'static str>,
}

impl From<Value> for RawDocument {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => {
                let id = match fields.remove("id") {
                    Some(Value::String(s)) => Some(s),
                    Some(Value::Number(n)) => Some(n.to_string()),
                    Some(Value::Null) | None => None,
                    Some(other) => {
                        fields.insert("id".to_string(), other);
                        None
                    }
                };
                Self { id, fields, malformed: None }
            }
            other => Self { malformed: Some(json_kind(&other)), ..Self::default() },
        }
    }
}

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl RawDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), ..Self::default() }
    }

    /// Builder-style field setter, mostly for tests and fixtures
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Identifier used in diagnostics
    pub fn record_id(&self) -> &str {
        self.id.as_deref().unwrap_or("<no id>")
    }

    /// Look up a dotted path such as `auto_filled_form_data.status`
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// First non-null value among several candidate paths
    pub fn first_of(&self, paths: &[&str]) -> Option<&Value> {
        paths.iter().filter_map(|p| self.get(p)).find(|v| !v.is_null())
    }

    /// Non-empty trimmed string among candidate paths
    pub fn text(&self, paths: &[&str]) -> Option<String> {
        paths
            .iter()
            .filter_map(|p| self.get(p))
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .find(|s| !s.is_empty())
    }
}

/// All raw collections fetched for one dashboard cycle
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(rename = "Clients", default)]
    pub clients: Vec<RawDocument>,
    #[serde(rename = "Applications", default)]
    pub applications: Vec<RawDocument>,
    #[serde(rename = "Tickets", default)]
    pub tickets: Vec<RawDocument>,
    #[serde(rename = "Visits", default)]
    pub visits: Vec<RawDocument>,
    #[serde(rename = "Agents", default)]
    pub agents: Vec<RawDocument>,
}

impl RawSnapshot {
    pub fn collection(&self, collection: Collection) -> &[RawDocument] {
        match collection {
            Collection::Clients => &self.clients,
            Collection::Applications => &self.applications,
            Collection::Tickets => &self.tickets,
            Collection::Visits => &self.visits,
            Collection::Agents => &self.agents,
        }
    }

    pub fn total_records(&self) -> usize {
        Collection::ALL.iter().map(|c| self.collection(*c).len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dotted_path_lookup() {
        let doc: RawDocument = serde_json::from_value(json!({
            "id": "app-1",
            "auto_filled_form_data": { "status": "submitted", "client_id": "c-9" }
        }))
        .unwrap();

        assert_eq!(doc.record_id(), "app-1");
        assert_eq!(doc.text(&["auto_filled_form_data.status"]).as_deref(), Some("submitted"));
        assert!(doc.get("auto_filled_form_data.missing").is_none());
        assert!(doc.get("auto_filled_form_data.status.deeper").is_none());
    }

    #[test]
    fn test_text_skips_blank_candidates() {
        let doc = RawDocument::new("x")
            .with("final_program_name", "  ")
            .with("system_suggest_program", "SNAP");
        assert_eq!(
            doc.text(&["final_program_name", "system_suggest_program"]).as_deref(),
            Some("SNAP")
        );
    }

    #[test]
    fn test_snapshot_uses_store_collection_names() {
        let snapshot: RawSnapshot = serde_json::from_value(json!({
            "Clients": [{ "id": "c1" }],
            "Agents": [{ "id": "a1", "displayName": "Alice" }]
        }))
        .unwrap();

        assert_eq!(snapshot.clients.len(), 1);
        assert_eq!(snapshot.agents.len(), 1);
        assert!(snapshot.tickets.is_empty());
        assert_eq!(snapshot.total_records(), 2);
    }

    #[test]
    fn test_lenient_elements() {
        let snapshot: RawSnapshot = serde_json::from_value(json!({
            "Agents": [{ "id": 7, "displayName": "Bob" }, { "id": true }],
            "Tickets": [null, "t-9"]
        }))
        .unwrap();

        assert_eq!(snapshot.agents[0].id.as_deref(), Some("7"));
        assert!(snapshot.agents[0].malformed.is_none());
        assert_eq!(snapshot.agents[1].id, None);
        assert_eq!(snapshot.agents[1].get("id"), Some(&json!(true)));
        assert_eq!(snapshot.tickets[0].malformed, Some("null"));
        assert_eq!(snapshot.tickets[1].malformed, Some("string"));
    }

    #[test]
    fn test_collection_parse() {
        assert_eq!("visits".parse::<Collection>().unwrap(), Collection::Visits);
        assert!("news".parse::<Collection>().is_err());
    }
}
