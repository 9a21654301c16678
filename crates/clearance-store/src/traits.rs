//! Store trait: the abstract interface to the record store.
//!
//! The gatekeeper only ever reads and writes records through this trait,
//! so the backing service can be swapped without touching policy code.

use async_trait::async_trait;
use clearance_core::{
    DataFeed, Network, UserAccessGrant, UserAccessRecord, WidgetPermission,
};

use crate::error::Result;
use crate::json::Seed;

/// Result of inserting a keyed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// Record was inserted.
    Inserted,
    /// A record with the same key already exists. The existing one is kept.
    AlreadyExists,
}

/// The Store trait: async interface to the record store.
///
/// All methods are async to support both blocking (SQLite) and remote
/// back ends. For SQLite, work runs on `spawn_blocking`.
///
/// # Ordering
///
/// - [`Store::list_feeds`] returns newest first (timestamp descending);
///   feeds with equal timestamps keep insertion order.
/// - [`Store::list_networks`] returns networks ordered by name.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // User Access
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up a user's access record.
    async fn get_user_access(&self, username: &str) -> Result<Option<UserAccessRecord>>;

    /// Insert or replace a user's access record.
    async fn put_user_access(&self, record: &UserAccessRecord) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Data Feeds
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a feed keyed by `feed_id`.
    async fn insert_feed(&self, feed: &DataFeed) -> Result<InsertResult>;

    /// All feeds, newest first.
    async fn list_feeds(&self) -> Result<Vec<DataFeed>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Knowledge Graph Networks
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a network keyed by `id`.
    async fn insert_network(&self, network: &Network) -> Result<InsertResult>;

    /// All networks, ordered by name.
    async fn list_networks(&self) -> Result<Vec<Network>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Widget Permissions
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a widget permission row. Duplicates are stored as given.
    async fn insert_widget_permission(&self, permission: &WidgetPermission) -> Result<()>;

    /// All widget permission rows for a user, in insertion order.
    async fn widget_permissions(&self, username: &str) -> Result<Vec<WidgetPermission>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Sessions
    // ─────────────────────────────────────────────────────────────────────────

    /// Store an opaque session snapshot.
    async fn put_session(&self, session_id: &str, snapshot: &[u8], at: i64) -> Result<()>;

    /// Load a session snapshot.
    async fn get_session(&self, session_id: &str) -> Result<Option<Vec<u8>>>;

    /// Remove a session snapshot. Returns whether one existed.
    async fn delete_session(&self, session_id: &str) -> Result<bool>;
}

/// Counts of records written by [`StoreExt::import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub users: usize,
    pub feeds_inserted: usize,
    pub feeds_skipped: usize,
    pub networks_inserted: usize,
    pub networks_skipped: usize,
    pub widget_permissions: usize,
}

/// Extension trait for common store patterns.
pub trait StoreExt: Store {
    /// Load a user's record and parse it into a grant.
    fn load_grant(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserAccessGrant>>> + Send;

    /// Write every record of a parsed seed.
    fn import(&self, seed: &Seed) -> impl std::future::Future<Output = Result<ImportReport>> + Send;
}

impl<S: Store + ?Sized> StoreExt for S {
    async fn load_grant(&self, username: &str) -> Result<Option<UserAccessGrant>> {
        Ok(self
            .get_user_access(username)
            .await?
            .map(|record| record.grant()))
    }

    async fn import(&self, seed: &Seed) -> Result<ImportReport> {
        let mut report = ImportReport::default();

        for record in &seed.user_access {
            self.put_user_access(record).await?;
            report.users += 1;
        }

        for feed in &seed.data_feeds {
            match self.insert_feed(feed).await? {
                InsertResult::Inserted => report.feeds_inserted += 1,
                InsertResult::AlreadyExists => report.feeds_skipped += 1,
            }
        }

        for network in &seed.knowledge_graph_networks {
            match self.insert_network(network).await? {
                InsertResult::Inserted => report.networks_inserted += 1,
                InsertResult::AlreadyExists => report.networks_skipped += 1,
            }
        }

        for permission in &seed.widget_permissions {
            self.insert_widget_permission(permission).await?;
            report.widget_permissions += 1;
        }

        tracing::debug!(?report, "imported seed records");
        Ok(report)
    }
}
