//! Login sessions.
//!
//! A session is the explicit value handed out at login and passed back to the
//! gatekeeper for every later request. It is persisted as a CBOR snapshot
//! keyed by its hex id.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use clearance_core::{
    is_accessible, network_visible, Classified, Network, Tier, UserAccessGrant, UserAccessRecord,
};

use crate::error::{GatekeeperError, Result};

/// A random 128-bit session identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub [u8; 16]);

impl SessionId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes: [u8; 16] = hex::decode(s).ok()?.try_into().ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.to_hex())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An authenticated user's access for one login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub username: String,

    /// Grant as loaded at login.
    pub grant: UserAccessGrant,

    /// Single tier derived from the grant's classification field.
    pub clearance: Tier,

    pub can_disseminate_orcon: bool,

    /// Login time (Unix milliseconds).
    pub started_at: i64,
}

impl Session {
    /// Start a session for a verified user record.
    pub fn new(id: SessionId, record: &UserAccessRecord, started_at: i64) -> Self {
        let grant = record.grant();
        let clearance = grant.clearance();

        Self {
            id,
            username: record.username.clone(),
            grant,
            clearance,
            can_disseminate_orcon: record.can_disseminate_orcon,
            started_at,
        }
    }

    /// Item policy against this session's grant.
    pub fn can_see<T: Classified>(&self, item: &T) -> bool {
        is_accessible(&self.grant, item)
    }

    /// Tier policy against this session's clearance.
    pub fn can_open(&self, network: &Network) -> bool {
        network_visible(network, self.clearance)
    }

    /// Classification choices offered by the feed view.
    pub fn classification_options(&self) -> &[String] {
        self.grant.classification_levels.display()
    }

    /// Releasability choices offered by the feed view.
    pub fn releasability_options(&self) -> &[String] {
        self.grant.releasability_levels.display()
    }

    /// Encode as a CBOR snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| GatekeeperError::Session(e.to_string()))?;
        Ok(buf)
    }

    /// Decode a CBOR snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| GatekeeperError::Session(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearance_core::ContentLabel;

    fn record() -> UserAccessRecord {
        UserAccessRecord {
            username: "user2".into(),
            password_digest: String::new(),
            classification_levels: "SECRET, UNCLASSIFIED".into(),
            releasability_levels: "REL TO, NOFORN".into(),
            can_disseminate_orcon: true,
        }
    }

    #[test]
    fn test_session_id_hex() {
        let id = SessionId::generate();
        let hex = id.to_hex();
        assert_eq!(hex.len(), 32);
        assert_eq!(SessionId::from_hex(&hex), Some(id));
        assert_eq!(SessionId::from_hex("00"), None);
    }

    #[test]
    fn test_session_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_session_derives_clearance() {
        let session = Session::new(SessionId([7; 16]), &record(), 42);
        assert_eq!(session.clearance, Tier::Secret);
        assert!(session.can_disseminate_orcon);

        assert!(session.can_see(&ContentLabel::new("SECRET", "NOFORN")));
        assert!(!session.can_see(&ContentLabel::new("SECRET", "ORCON")));

        assert!(session.can_open(&Network::new("n", "HUMINT", "secret")));
        assert!(!session.can_open(&Network::new("n", "SOF", "top_secret")));

        assert_eq!(session.classification_options(), ["SECRET", "UNCLASSIFIED"]);
        assert_eq!(session.releasability_options(), ["REL TO", "NOFORN"]);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let session = Session::new(SessionId::generate(), &record(), 1_700_000_000_000);
        let bytes = session.to_bytes().unwrap();
        let decoded = Session::from_bytes(&bytes).unwrap();

        assert_eq!(decoded, session);
        assert!(decoded.grant.allows_releasability("noforn"));
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(matches!(
            Session::from_bytes(b"\xff\x00garbage"),
            Err(GatekeeperError::Session(_))
        ));
    }
}
