//! Typed records read from the record store.
//!
//! Every required field is a plain `String`. Untyped or incomplete rows are
//! rejected by the store adapter before they reach these types.

use serde::{Deserialize, Serialize};

use crate::grant::UserAccessGrant;
use crate::policy::Classified;
use crate::tier::Tier;

/// A row of the `user_access` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccessRecord {
    pub username: String,

    /// Hex-encoded credential digest. Never the password itself.
    pub password_digest: String,

    /// Comma-separated classification levels.
    pub classification_levels: String,

    /// Comma-separated releasability levels.
    pub releasability_levels: String,

    /// Whether the user may disseminate ORCON material.
    #[serde(default)]
    pub can_disseminate_orcon: bool,
}

impl UserAccessRecord {
    /// Parse the two level fields into a grant.
    pub fn grant(&self) -> UserAccessGrant {
        UserAccessGrant::from_fields(&self.classification_levels, &self.releasability_levels)
    }
}

/// A row of the `data_feeds` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFeed {
    pub feed_id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub source: String,
    #[serde(default)]
    pub url: Option<String>,
    pub security_classification: String,
    pub releasability: String,

    /// Priority intelligence requirement, if tagged.
    #[serde(default, alias = "PIR")]
    pub pir: Option<String>,
    #[serde(default)]
    pub feed_frequency: Option<String>,

    /// Publication time (Unix milliseconds).
    pub timestamp: i64,
}

impl Classified for DataFeed {
    fn classification(&self) -> &str {
        &self.security_classification
    }

    fn releasability(&self) -> &str {
        &self.releasability
    }
}

/// A row of the `knowledge_graph_networks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    pub classification: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Network {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        classification: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            classification: classification.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The network's tier, recomputed from its label.
    pub fn tier(&self) -> Tier {
        Tier::normalize(&self.classification)
    }
}
