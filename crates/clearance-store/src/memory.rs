//! In-memory implementation of the Store trait.
//!
//! Same ordering semantics as SQLite, no persistence. Used by tests and as
//! the default store for fixtures.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use clearance_core::{DataFeed, Network, UserAccessRecord, WidgetPermission};

use crate::error::{Result, StoreError};
use crate::traits::{InsertResult, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// User records keyed by username.
    users: HashMap<String, UserAccessRecord>,

    /// Feeds in insertion order.
    feeds: Vec<DataFeed>,

    /// Networks in insertion order.
    networks: Vec<Network>,

    /// Widget permission rows in insertion order.
    widget_permissions: Vec<WidgetPermission>,

    /// Session snapshots keyed by session id.
    sessions: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user_access(&self, username: &str) -> Result<Option<UserAccessRecord>> {
        Ok(self.read()?.users.get(username).cloned())
    }

    async fn put_user_access(&self, record: &UserAccessRecord) -> Result<()> {
        self.write()?
            .users
            .insert(record.username.clone(), record.clone());
        Ok(())
    }

    async fn insert_feed(&self, feed: &DataFeed) -> Result<InsertResult> {
        let mut inner = self.write()?;
        if inner.feeds.iter().any(|f| f.feed_id == feed.feed_id) {
            return Ok(InsertResult::AlreadyExists);
        }
        inner.feeds.push(feed.clone());
        Ok(InsertResult::Inserted)
    }

    async fn list_feeds(&self) -> Result<Vec<DataFeed>> {
        let mut feeds = self.read()?.feeds.clone();
        feeds.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(feeds)
    }

    async fn insert_network(&self, network: &Network) -> Result<InsertResult> {
        let mut inner = self.write()?;
        if inner.networks.iter().any(|n| n.id == network.id) {
            return Ok(InsertResult::AlreadyExists);
        }
        inner.networks.push(network.clone());
        Ok(InsertResult::Inserted)
    }

    async fn list_networks(&self) -> Result<Vec<Network>> {
        let mut networks = self.read()?.networks.clone();
        networks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(networks)
    }

    async fn insert_widget_permission(&self, permission: &WidgetPermission) -> Result<()> {
        self.write()?.widget_permissions.push(permission.clone());
        Ok(())
    }

    async fn widget_permissions(&self, username: &str) -> Result<Vec<WidgetPermission>> {
        Ok(self
            .read()?
            .widget_permissions
            .iter()
            .filter(|p| p.username == username)
            .cloned()
            .collect())
    }

    async fn put_session(&self, session_id: &str, snapshot: &[u8], _at: i64) -> Result<()> {
        self.write()?
            .sessions
            .insert(session_id.to_string(), snapshot.to_vec());
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.read()?.sessions.get(session_id).cloned())
    }

    async fn delete_session(&self, session_id: &str) -> Result<bool> {
        Ok(self.write()?.sessions.remove(session_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreExt;
    use clearance_core::WidgetKind;

    fn feed(id: &str, ts: i64) -> DataFeed {
        DataFeed {
            feed_id: id.into(),
            title: format!("feed {}", id),
            content: None,
            source: "test".into(),
            url: None,
            security_classification: "SECRET".into(),
            releasability: "NOFORN".into(),
            pir: None,
            feed_frequency: None,
            timestamp: ts,
        }
    }

    #[tokio::test]
    async fn test_memory_store_feeds_newest_first() {
        let store = MemoryStore::new();
        store.insert_feed(&feed("a", 100)).await.unwrap();
        store.insert_feed(&feed("b", 300)).await.unwrap();
        store.insert_feed(&feed("c", 100)).await.unwrap();

        let ids: Vec<String> = store
            .list_feeds()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.feed_id)
            .collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_memory_store_idempotent_insert() {
        let store = MemoryStore::new();
        let r1 = store.insert_feed(&feed("a", 1)).await.unwrap();
        let r2 = store.insert_feed(&feed("a", 2)).await.unwrap();

        assert_eq!(r1, InsertResult::Inserted);
        assert_eq!(r2, InsertResult::AlreadyExists);
        assert_eq!(store.list_feeds().await.unwrap()[0].timestamp, 1);
    }

    #[tokio::test]
    async fn test_memory_store_load_grant() {
        let store = MemoryStore::new();
        assert!(store.load_grant("ghost").await.unwrap().is_none());

        store
            .put_user_access(&UserAccessRecord {
                username: "user2".into(),
                password_digest: String::new(),
                classification_levels: "SECRET".into(),
                releasability_levels: "NOFORN".into(),
                can_disseminate_orcon: false,
            })
            .await
            .unwrap();

        let grant = store.load_grant("user2").await.unwrap().unwrap();
        assert!(grant.allows_classification("secret"));
    }

    #[tokio::test]
    async fn test_memory_store_widget_rows_per_user() {
        let store = MemoryStore::new();
        store
            .insert_widget_permission(&WidgetPermission::enabled("a", WidgetKind::News, "feed1"))
            .await
            .unwrap();
        store
            .insert_widget_permission(&WidgetPermission::enabled("b", WidgetKind::Rss, "bbc"))
            .await
            .unwrap();

        let rows = store.widget_permissions("a").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].widget_type, WidgetKind::News);
    }

    #[tokio::test]
    async fn test_memory_store_sessions() {
        let store = MemoryStore::new();
        store.put_session("s1", b"snapshot", 0).await.unwrap();
        assert_eq!(store.get_session("s1").await.unwrap().unwrap(), b"snapshot");
        assert!(store.delete_session("s1").await.unwrap());
        assert!(!store.delete_session("s1").await.unwrap());
        assert!(store.get_session("s1").await.unwrap().is_none());
    }
}
