//! The Gatekeeper: unified API for access-filtered reads.
//!
//! The Gatekeeper brings together the record store, credentials, sessions
//! and both access policies. Every read is fail-closed: a user with no
//! access record sees nothing.

use std::sync::Arc;

use clearance_core::{
    default_networks, filter_accessible, network, DataFeed, FeedQuery, Network, UserAccessGrant,
    WidgetPermissions,
};
use clearance_store::{Store, StoreExt};

use crate::credentials::verify_record;
use crate::error::{GatekeeperError, Result};
use crate::session::{Session, SessionId};

/// Configuration for the Gatekeeper.
#[derive(Debug, Clone)]
pub struct GatekeeperConfig {
    /// Serve the built-in network list when the store has none.
    pub fallback_networks: bool,
    /// Write session snapshots to the store at login.
    pub persist_sessions: bool,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            fallback_networks: true,
            persist_sessions: true,
        }
    }
}

/// The main Gatekeeper struct.
///
/// Provides a unified API for:
/// - Logging in and out
/// - Reading the data feeds a user may see
/// - Listing the knowledge-graph networks a session may open
/// - Reading a user's dashboard widget permissions
pub struct Gatekeeper<S: Store> {
    /// The record store.
    store: Arc<S>,
    /// Configuration.
    config: GatekeeperConfig,
}

impl<S: Store> Gatekeeper<S> {
    /// Create a new gatekeeper over a store.
    pub fn new(store: S, config: GatekeeperConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create a gatekeeper over a store that is shared with other owners.
    pub fn with_shared_store(store: Arc<S>, config: GatekeeperConfig) -> Self {
        Self { store, config }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GatekeeperConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify credentials and start a session.
    ///
    /// An unknown username and a wrong password both fail with
    /// [`GatekeeperError::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let record = match self.store.get_user_access(username).await? {
            Some(record) if verify_record(&record, password) => record,
            _ => {
                tracing::warn!(username, "login rejected");
                return Err(GatekeeperError::InvalidCredentials);
            }
        };

        let session = Session::new(SessionId::generate(), &record, now_millis());

        if self.config.persist_sessions {
            self.store
                .put_session(&session.id.to_hex(), &session.to_bytes()?, session.started_at)
                .await?;
        }

        tracing::info!(
            username,
            session = %session.id,
            clearance = %session.clearance,
            "login"
        );
        Ok(session)
    }

    /// Load a previously persisted session.
    pub async fn resume(&self, session_id: &str) -> Result<Session> {
        let snapshot = self
            .store
            .get_session(session_id)
            .await?
            .ok_or_else(|| GatekeeperError::SessionNotFound(session_id.to_string()))?;

        let session = Session::from_bytes(&snapshot)?;
        tracing::debug!(username = %session.username, session = %session.id, "resumed session");
        Ok(session)
    }

    /// End a session. Returns whether a stored snapshot was removed.
    pub async fn logout(&self, session: Session) -> Result<bool> {
        let removed = self.store.delete_session(&session.id.to_hex()).await?;
        tracing::info!(username = %session.username, session = %session.id, "logout");
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Item Policy
    // ─────────────────────────────────────────────────────────────────────────

    /// Load a user's grant. `None` when the user has no access record.
    pub async fn grant_for(&self, username: &str) -> Result<Option<UserAccessGrant>> {
        Ok(self.store.load_grant(username).await?)
    }

    /// All feeds the user may see, newest first.
    ///
    /// A user with no access record sees an empty list.
    pub async fn accessible_feeds(&self, username: &str) -> Result<Vec<DataFeed>> {
        let Some(grant) = self.grant_for(username).await? else {
            tracing::warn!(username, "no access grant, denying all feeds");
            return Ok(Vec::new());
        };

        let feeds = self.store.list_feeds().await?;
        let total = feeds.len();
        let visible = filter_accessible(&grant, feeds);

        tracing::debug!(username, total, visible = visible.len(), "filtered feeds");
        Ok(visible)
    }

    /// Accessible feeds for a session, narrowed and sorted by a query.
    ///
    /// The grant is reloaded from the store, so a changed access record
    /// takes effect without a new login.
    pub async fn feed_view(&self, session: &Session, query: &FeedQuery) -> Result<Vec<DataFeed>> {
        let feeds = self.accessible_feeds(&session.username).await?;
        Ok(query.apply(feeds))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tier Policy
    // ─────────────────────────────────────────────────────────────────────────

    /// Networks the session's clearance may open, ordered by name.
    pub async fn visible_networks(&self, session: &Session) -> Result<Vec<Network>> {
        let mut networks = self.store.list_networks().await?;

        if networks.is_empty() && self.config.fallback_networks {
            tracing::debug!("no stored networks, using defaults");
            networks = default_networks();
        }

        let total = networks.len();
        let visible = network::visible_networks(networks, session.clearance);

        tracing::debug!(
            username = %session.username,
            clearance = %session.clearance,
            total,
            visible = visible.len(),
            "filtered networks"
        );
        Ok(visible)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Widgets
    // ─────────────────────────────────────────────────────────────────────────

    /// The session user's deduplicated widget permissions.
    pub async fn widget_permissions(&self, session: &Session) -> Result<WidgetPermissions> {
        let rows = self.store.widget_permissions(&session.username).await?;
        Ok(WidgetPermissions::new(rows))
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
