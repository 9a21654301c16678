//! Database schema migrations for SQLite.
//!
//! Versioned migrations: each version is applied once, inside a single
//! transaction, and recorded in `schema_migrations`.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// Idempotent.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let current: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;

    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![version, now_millis()],
            )?;
            tracing::debug!(version, "applied schema migration");
        }

        tx.commit()?;
    }

    Ok(())
}

fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- One row per login. Level fields are comma-separated.
        CREATE TABLE user_access (
            username TEXT PRIMARY KEY,
            password_digest TEXT NOT NULL,        -- hex blake3 credential digest
            classification_levels TEXT NOT NULL,
            releasability_levels TEXT NOT NULL,
            can_disseminate_orcon INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE data_feeds (
            feed_id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT,
            source TEXT NOT NULL,
            url TEXT,
            security_classification TEXT NOT NULL,
            releasability TEXT NOT NULL,
            pir TEXT,
            feed_frequency TEXT,
            timestamp INTEGER NOT NULL            -- Unix ms
        );

        CREATE TABLE knowledge_graph_networks (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            classification TEXT NOT NULL,
            description TEXT
        );

        -- Duplicates are allowed; readers deduplicate.
        CREATE TABLE widget_permissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            widget_type TEXT NOT NULL,            -- weather | crypto | rss | news
            widget_instance TEXT NOT NULL,
            is_enabled INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE sessions (
            session_id TEXT PRIMARY KEY,
            snapshot BLOB NOT NULL,               -- CBOR session snapshot
            created_at INTEGER NOT NULL
        );

        CREATE INDEX idx_data_feeds_timestamp ON data_feeds(timestamp);
        CREATE INDEX idx_networks_name ON knowledge_graph_networks(name);
        CREATE INDEX idx_widget_permissions_username ON widget_permissions(username);
        "#,
    )?;

    Ok(())
}

fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creates_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        for table in [
            "user_access",
            "data_feeds",
            "knowledge_graph_networks",
            "widget_permissions",
            "sessions",
            "schema_migrations",
        ] {
            assert!(tables.contains(&table.to_string()), "missing {}", table);
        }
    }

    #[test]
    fn test_migration_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();

        let version: u32 = conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }
}
