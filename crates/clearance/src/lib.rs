//! # Clearance
//!
//! The unified API for Clearance: classification and releasability gating of
//! dashboard content.
//!
//! ## Overview
//!
//! Clearance answers one question per request: may this user see this thing?
//!
//! - **Data feeds**: visible iff the item's classification AND releasability
//!   each match one of the user's granted levels
//! - **Knowledge-graph networks**: visible iff the user's clearance tier is
//!   at least the network's tier
//! - **Widgets**: visible iff an enabled permission row names the instance
//!
//! ## Key Concepts
//!
//! - **Grant**: the user's comma-separated classification and releasability
//!   levels, loaded from the record store by username.
//! - **Clearance**: the single tier derived from a grant.
//! - **Session**: an explicit value created at login and passed back on every
//!   request. There is no ambient "current user".
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clearance::{Gatekeeper, GatekeeperConfig, FeedQuery};
//! use clearance::store::SqliteStore;
//!
//! async fn example() {
//!     let store = SqliteStore::open("clearance.db").unwrap();
//!     let gatekeeper = Gatekeeper::new(store, GatekeeperConfig::default());
//!
//!     let session = gatekeeper.login("user1", "password").await.unwrap();
//!
//!     let feeds = gatekeeper
//!         .feed_view(&session, &FeedQuery::new().search("port"))
//!         .await
//!         .unwrap();
//!     let networks = gatekeeper.visible_networks(&session).await.unwrap();
//!
//!     gatekeeper.logout(session).await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `clearance::core` - Pure policy (tiers, grants, item matching)
//! - `clearance::store` - Record store abstraction and SQLite

pub mod credentials;
pub mod error;
pub mod gatekeeper;
pub mod session;

// Re-export component crates
pub use clearance_core as core;
pub use clearance_store as store;

// Re-export main types for convenience
pub use credentials::{access_record, verify_record, PasswordDigest};
pub use error::{GatekeeperError, Result};
pub use gatekeeper::{Gatekeeper, GatekeeperConfig};
pub use session::{Session, SessionId};

// Re-export commonly used core types
pub use clearance_core::{
    can_access, is_accessible, DataFeed, FeedQuery, Network, SortDirection, SortField, Tier,
    UserAccessGrant, WidgetKind, WidgetPermissions,
};
