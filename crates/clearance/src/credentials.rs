//! Credential digests.
//!
//! Passwords are never stored. A user record carries a keyed BLAKE3 digest of
//! `username || 0x00 || password` under a fixed derivation context, hex
//! encoded.

use std::fmt;

use clearance_core::UserAccessRecord;

/// Key derivation context for credential digests.
pub const CREDENTIAL_CONTEXT: &str = "clearance 2024-06 user credential digest v1";

/// A 32-byte credential digest.
///
/// Equality is constant time.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PasswordDigest(blake3::Hash);

impl PasswordDigest {
    /// Derive the digest for a username/password pair.
    pub fn derive(username: &str, password: &str) -> Self {
        let mut hasher = blake3::Hasher::new_derive_key(CREDENTIAL_CONTEXT);
        hasher.update(username.as_bytes());
        hasher.update(&[0]);
        hasher.update(password.as_bytes());
        Self(hasher.finalize())
    }

    /// Parse a stored hex digest. Returns `None` for anything that is not
    /// exactly 32 hex-encoded bytes.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes: [u8; 32] = hex::decode(s).ok()?.try_into().ok()?;
        Some(Self(blake3::Hash::from(bytes)))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    /// Check a login attempt against this digest.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        *self == Self::derive(username, password)
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordDigest({}..)", &self.to_hex()[..8])
    }
}

/// Build a user access record with a freshly derived digest.
pub fn access_record(
    username: &str,
    password: &str,
    classification_levels: &str,
    releasability_levels: &str,
) -> UserAccessRecord {
    UserAccessRecord {
        username: username.to_string(),
        password_digest: PasswordDigest::derive(username, password).to_hex(),
        classification_levels: classification_levels.to_string(),
        releasability_levels: releasability_levels.to_string(),
        can_disseminate_orcon: false,
    }
}

/// Check a login attempt against a stored record.
///
/// A record whose digest field does not parse never verifies.
pub fn verify_record(record: &UserAccessRecord, password: &str) -> bool {
    PasswordDigest::from_hex(&record.password_digest)
        .is_some_and(|digest| digest.verify(&record.username, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let a = PasswordDigest::derive("user1", "hunter2");
        let b = PasswordDigest::derive("user1", "hunter2");
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 64);
    }

    #[test]
    fn test_digest_binds_username() {
        let a = PasswordDigest::derive("user1", "pw");
        let b = PasswordDigest::derive("user2", "pw");
        assert_ne!(a, b);

        // The separator keeps "ab"+"c" apart from "a"+"bc".
        assert_ne!(
            PasswordDigest::derive("ab", "c"),
            PasswordDigest::derive("a", "bc")
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let digest = PasswordDigest::derive("user1", "pw");
        assert_eq!(PasswordDigest::from_hex(&digest.to_hex()), Some(digest));
        assert_eq!(PasswordDigest::from_hex("zz"), None);
        assert_eq!(PasswordDigest::from_hex("abcd"), None);
    }

    #[test]
    fn test_verify_record() {
        let record = access_record("user2", "s3cret", "SECRET", "NOFORN");
        assert!(verify_record(&record, "s3cret"));
        assert!(!verify_record(&record, "S3CRET"));

        let broken = UserAccessRecord {
            password_digest: "not hex".into(),
            ..record
        };
        assert!(!verify_record(&broken, "s3cret"));
    }
}
