//! JSON row adapter.
//!
//! Rows arriving from the record service are untyped JSON. They are decoded
//! here into typed records and rejected as a whole if any required field is
//! missing or has the wrong type. Nothing untyped crosses into the policy
//! core.
//!
//! Unknown columns (e.g. `metadata`, `created_at`) are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use clearance_core::{DataFeed, Network, UserAccessRecord, WidgetPermission};

use crate::error::{Result, StoreError};

/// A full set of records, keyed by table name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub user_access: Vec<UserAccessRecord>,
    #[serde(default)]
    pub data_feeds: Vec<DataFeed>,
    #[serde(default)]
    pub knowledge_graph_networks: Vec<Network>,
    #[serde(default)]
    pub widget_permissions: Vec<WidgetPermission>,
}

/// Parse a seed document.
pub fn parse_seed(json: &str) -> Result<Seed> {
    decode("seed", json)
}

/// Parse a JSON array of `data_feeds` rows.
pub fn parse_feeds(json: &str) -> Result<Vec<DataFeed>> {
    decode("data_feeds", json)
}

/// Parse a JSON array of `knowledge_graph_networks` rows.
pub fn parse_networks(json: &str) -> Result<Vec<Network>> {
    decode("knowledge_graph_networks", json)
}

/// Parse a single `user_access` row.
pub fn parse_user_access(json: &str) -> Result<UserAccessRecord> {
    decode("user_access", json)
}

/// Parse a JSON array of `widget_permissions` rows.
pub fn parse_widget_permissions(json: &str) -> Result<Vec<WidgetPermission>> {
    decode("widget_permissions", json)
}

fn decode<T: DeserializeOwned>(table: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| {
        tracing::warn!(table, error = %e, "rejected malformed rows");
        StoreError::Serialization(format!("{}: {}", table, e))
    })
}
