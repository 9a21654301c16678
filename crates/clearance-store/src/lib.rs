//! # Clearance Store
//!
//! Record store abstraction for Clearance. Provides a trait-based interface
//! to the user access, data feed, network, widget permission and session
//! tables with SQLite and in-memory implementations.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all record operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`Seed`] - A typed bundle of rows decoded from JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clearance_store::{parse_seed, SqliteStore, StoreExt};
//!
//! async fn example() {
//!     let store = SqliteStore::open("clearance.db").unwrap();
//!
//!     let seed = parse_seed(r#"{"data_feeds": []}"#).unwrap();
//!     store.import(&seed).await.unwrap();
//!
//!     let grant = store.load_grant("user1").await.unwrap();
//!     assert!(grant.is_none());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Typed at the boundary**: malformed JSON rows are rejected, never
//!   passed through with missing tags
//! - **Idempotent inserts**: feeds and networks keep the first record per id
//! - **Stable ordering**: both back ends list feeds and networks identically

pub mod error;
pub mod json;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use json::{
    parse_feeds, parse_networks, parse_seed, parse_user_access, parse_widget_permissions, Seed,
};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{ImportReport, InsertResult, Store, StoreExt};
