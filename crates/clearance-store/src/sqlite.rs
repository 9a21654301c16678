//! SQLite implementation of the Store trait.
//!
//! Uses rusqlite with bundled SQLite, wrapped in async via
//! `tokio::task::spawn_blocking`.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use clearance_core::{DataFeed, Network, UserAccessRecord, WidgetKind, WidgetPermission};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{InsertResult, Store};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(e.to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

fn row_to_feed(row: &rusqlite::Row<'_>) -> rusqlite::Result<DataFeed> {
    Ok(DataFeed {
        feed_id: row.get("feed_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        source: row.get("source")?,
        url: row.get("url")?,
        security_classification: row.get("security_classification")?,
        releasability: row.get("releasability")?,
        pir: row.get("pir")?,
        feed_frequency: row.get("feed_frequency")?,
        timestamp: row.get("timestamp")?,
    })
}

fn row_to_network(row: &rusqlite::Row<'_>) -> rusqlite::Result<Network> {
    Ok(Network {
        id: row.get("id")?,
        name: row.get("name")?,
        classification: row.get("classification")?,
        description: row.get("description")?,
    })
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserAccessRecord> {
    Ok(UserAccessRecord {
        username: row.get("username")?,
        password_digest: row.get("password_digest")?,
        classification_levels: row.get("classification_levels")?,
        releasability_levels: row.get("releasability_levels")?,
        can_disseminate_orcon: row.get("can_disseminate_orcon")?,
    })
}

fn inserted(changed: usize) -> InsertResult {
    if changed == 0 {
        InsertResult::AlreadyExists
    } else {
        InsertResult::Inserted
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_user_access(&self, username: &str) -> Result<Option<UserAccessRecord>> {
        let username = username.to_string();

        self.with_conn(move |conn| {
            Ok(conn
                .query_row(
                    "SELECT * FROM user_access WHERE username = ?1",
                    params![username],
                    row_to_user,
                )
                .optional()?)
        })
        .await
    }

    async fn put_user_access(&self, record: &UserAccessRecord) -> Result<()> {
        let record = record.clone();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO user_access (
                    username, password_digest, classification_levels,
                    releasability_levels, can_disseminate_orcon
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(username) DO UPDATE SET
                    password_digest = excluded.password_digest,
                    classification_levels = excluded.classification_levels,
                    releasability_levels = excluded.releasability_levels,
                    can_disseminate_orcon = excluded.can_disseminate_orcon",
                params![
                    record.username,
                    record.password_digest,
                    record.classification_levels,
                    record.releasability_levels,
                    record.can_disseminate_orcon,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn insert_feed(&self, feed: &DataFeed) -> Result<InsertResult> {
        let feed = feed.clone();

        self.with_conn(move |conn| {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO data_feeds (
                    feed_id, title, content, source, url, security_classification,
                    releasability, pir, feed_frequency, timestamp
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    feed.feed_id,
                    feed.title,
                    feed.content,
                    feed.source,
                    feed.url,
                    feed.security_classification,
                    feed.releasability,
                    feed.pir,
                    feed.feed_frequency,
                    feed.timestamp,
                ],
            )?;
            Ok(inserted(changed))
        })
        .await
    }

    async fn list_feeds(&self) -> Result<Vec<DataFeed>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT * FROM data_feeds ORDER BY timestamp DESC, rowid ASC")?;
            let feeds = stmt
                .query_map([], row_to_feed)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(feeds)
        })
        .await
    }

    async fn insert_network(&self, network: &Network) -> Result<InsertResult> {
        let network = network.clone();

        self.with_conn(move |conn| {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO knowledge_graph_networks (id, name, classification, description)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    network.id,
                    network.name,
                    network.classification,
                    network.description,
                ],
            )?;
            Ok(inserted(changed))
        })
        .await
    }

    async fn list_networks(&self) -> Result<Vec<Network>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT * FROM knowledge_graph_networks ORDER BY name ASC, rowid ASC")?;
            let networks = stmt
                .query_map([], row_to_network)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(networks)
        })
        .await
    }

    async fn insert_widget_permission(&self, permission: &WidgetPermission) -> Result<()> {
        let permission = permission.clone();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO widget_permissions (username, widget_type, widget_instance, is_enabled)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    permission.username,
                    permission.widget_type.as_str(),
                    permission.widget_instance,
                    permission.is_enabled,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn widget_permissions(&self, username: &str) -> Result<Vec<WidgetPermission>> {
        let username = username.to_string();

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT widget_type, widget_instance, is_enabled FROM widget_permissions
                 WHERE username = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt
                .query_map(params![username], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, bool>(2)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(kind, instance, enabled)| -> Result<WidgetPermission> {
                    let widget_type = kind
                        .parse::<WidgetKind>()
                        .map_err(|e| StoreError::InvalidData(e.to_string()))?;
                    Ok(WidgetPermission {
                        username: username.clone(),
                        widget_type,
                        widget_instance: instance,
                        is_enabled: enabled,
                    })
                })
                .collect()
        })
        .await
    }

    async fn put_session(&self, session_id: &str, snapshot: &[u8], at: i64) -> Result<()> {
        let session_id = session_id.to_string();
        let snapshot = snapshot.to_vec();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO sessions (session_id, snapshot, created_at)
                 VALUES (?1, ?2, ?3)",
                params![session_id, snapshot, at],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Vec<u8>>> {
        let session_id = session_id.to_string();

        self.with_conn(move |conn| {
            Ok(conn
                .query_row(
                    "SELECT snapshot FROM sessions WHERE session_id = ?1",
                    params![session_id],
                    |row| row.get(0),
                )
                .optional()?)
        })
        .await
    }

    async fn delete_session(&self, session_id: &str) -> Result<bool> {
        let session_id = session_id.to_string();

        self.with_conn(move |conn| {
            let changed = conn.execute(
                "DELETE FROM sessions WHERE session_id = ?1",
                params![session_id],
            )?;
            Ok(changed > 0)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreExt;

    fn feed(id: &str, class: &str, ts: i64) -> DataFeed {
        DataFeed {
            feed_id: id.into(),
            title: format!("feed {}", id),
            content: Some("body".into()),
            source: "OSINT".into(),
            url: None,
            security_classification: class.into(),
            releasability: "NOFORN".into(),
            pir: Some("PIR-1".into()),
            feed_frequency: None,
            timestamp: ts,
        }
    }

    #[tokio::test]
    async fn test_sqlite_feed_roundtrip_and_order() {
        let store = SqliteStore::open_memory().unwrap();

        assert_eq!(
            store.insert_feed(&feed("a", "SECRET", 100)).await.unwrap(),
            InsertResult::Inserted
        );
        store.insert_feed(&feed("b", "TOP SECRET", 200)).await.unwrap();
        store.insert_feed(&feed("c", "SECRET", 100)).await.unwrap();
        assert_eq!(
            store.insert_feed(&feed("a", "SECRET", 999)).await.unwrap(),
            InsertResult::AlreadyExists
        );

        let feeds = store.list_feeds().await.unwrap();
        let ids: Vec<&str> = feeds.iter().map(|f| f.feed_id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(feeds[1], feed("a", "SECRET", 100));
    }

    #[tokio::test]
    async fn test_sqlite_user_upsert() {
        let store = SqliteStore::open_memory().unwrap();
        let mut record = UserAccessRecord {
            username: "user1".into(),
            password_digest: "ab".into(),
            classification_levels: "SECRET".into(),
            releasability_levels: "NOFORN".into(),
            can_disseminate_orcon: true,
        };
        store.put_user_access(&record).await.unwrap();

        record.classification_levels = "TOP SECRET, SECRET".into();
        store.put_user_access(&record).await.unwrap();

        let loaded = store.get_user_access("user1").await.unwrap().unwrap();
        assert_eq!(loaded, record);
        assert!(store.get_user_access("nobody").await.unwrap().is_none());

        let grant = store.load_grant("user1").await.unwrap().unwrap();
        assert!(grant.allows_classification("top secret"));
    }

    #[tokio::test]
    async fn test_sqlite_networks_by_name() {
        let store = SqliteStore::open_memory().unwrap();
        store
            .insert_network(&Network::new("n2", "Special Operations", "top_secret"))
            .await
            .unwrap();
        store
            .insert_network(&Network::new("n1", "Angola", "unclassified"))
            .await
            .unwrap();

        let names: Vec<String> = store
            .list_networks()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(names, ["Angola", "Special Operations"]);
    }

    #[tokio::test]
    async fn test_sqlite_widget_permissions() {
        let store = SqliteStore::open_memory().unwrap();
        let row = WidgetPermission::enabled("user1", WidgetKind::Weather, "dubai");
        store.insert_widget_permission(&row).await.unwrap();
        store.insert_widget_permission(&row).await.unwrap();

        let rows = store.widget_permissions("user1").await.unwrap();
        assert_eq!(rows, vec![row.clone(), row]);
        assert!(store.widget_permissions("user2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clearance.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert_feed(&feed("a", "SECRET", 1)).await.unwrap();
            store.put_session("s1", b"snap", 1).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.list_feeds().await.unwrap().len(), 1);
        assert_eq!(store.get_session("s1").await.unwrap().unwrap(), b"snap");
        assert!(store.delete_session("s1").await.unwrap());
        assert!(store.get_session("s1").await.unwrap().is_none());
    }
}
