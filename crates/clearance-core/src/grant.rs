//! User access grants.
//!
//! A grant holds the classification and releasability levels a user may see.
//! Both are stored as the raw comma-separated field from the user record;
//! the parsed, normalized tokens are derived once at construction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::normalize::{exact_label, split_levels};
use crate::tier::Tier;

/// A parsed comma-separated level field.
///
/// Display tokens keep their original casing. Matching uses uppercased,
/// trimmed tokens. An empty field still yields one empty token, which only
/// an empty tag can match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LevelSet {
    raw: String,
    display: Vec<String>,
    normalized: HashSet<String>,
}

impl LevelSet {
    /// Parse a comma-separated field.
    pub fn parse(field: impl Into<String>) -> Self {
        let raw = field.into();
        let display = split_levels(&raw);
        let normalized = display
            .iter()
            .map(|token| exact_label(token))
            .collect();

        Self {
            raw,
            display,
            normalized,
        }
    }

    /// The field as it was supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Tokens in their original casing, in field order.
    pub fn display(&self) -> &[String] {
        &self.display
    }

    /// Check whether a label matches any granted level exactly.
    pub fn contains(&self, label: &str) -> bool {
        self.normalized.contains(&exact_label(label))
    }

    /// True when no token can match anything. Only the default set is empty:
    /// any parsed field holds at least one token.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Number of distinct normalized levels.
    pub fn len(&self) -> usize {
        self.normalized.len()
    }
}

impl PartialEq for LevelSet {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for LevelSet {}

impl From<String> for LevelSet {
    fn from(raw: String) -> Self {
        LevelSet::parse(raw)
    }
}

impl From<&str> for LevelSet {
    fn from(raw: &str) -> Self {
        LevelSet::parse(raw)
    }
}

impl From<LevelSet> for String {
    fn from(set: LevelSet) -> Self {
        set.raw
    }
}

/// The classification and releasability levels granted to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccessGrant {
    /// Classifications the user may see.
    pub classification_levels: LevelSet,

    /// Releasability tags the user may see.
    pub releasability_levels: LevelSet,
}

impl UserAccessGrant {
    /// Build a grant from the two comma-separated record fields.
    pub fn from_fields(classification_levels: &str, releasability_levels: &str) -> Self {
        Self {
            classification_levels: LevelSet::parse(classification_levels),
            releasability_levels: LevelSet::parse(releasability_levels),
        }
    }

    /// Build a grant from explicit level lists.
    pub fn from_levels<C, R>(classifications: C, releasability: R) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Self::from_fields(&join(classifications), &join(releasability))
    }

    /// A grant that matches nothing.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Check a single classification label.
    pub fn allows_classification(&self, label: &str) -> bool {
        self.classification_levels.contains(label)
    }

    /// Check a single releasability label.
    pub fn allows_releasability(&self, label: &str) -> bool {
        self.releasability_levels.contains(label)
    }

    /// The user's single clearance tier, used for network gating.
    pub fn clearance(&self) -> Tier {
        Tier::clearance_of(self.classification_levels.raw())
    }
}

fn join<I>(levels: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    levels
        .into_iter()
        .map(|level| level.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_set_case_insensitive() {
        let set = LevelSet::parse("Secret, unclassified");
        assert!(set.contains("SECRET"));
        assert!(set.contains("  secret  "));
        assert!(set.contains("UNCLASSIFIED"));
        assert!(!set.contains("TOP SECRET"));
        assert_eq!(set.display(), ["Secret", "unclassified"]);
    }

    #[test]
    fn test_empty_field_matches_only_empty_tag() {
        let set = LevelSet::parse("");
        assert!(!set.is_empty());
        assert!(set.contains(""));
        assert!(set.contains("   "));
        assert!(!set.contains("SECRET"));
        assert_eq!(set.display(), [""]);
    }

    #[test]
    fn test_blank_tokens_collapse() {
        let set = LevelSet::parse("NOFORN,, ,ORCON");
        assert_eq!(set.len(), 3);
        assert!(set.contains(" "));
        assert!(set.contains("orcon"));
    }

    #[test]
    fn test_default_set_matches_nothing() {
        let set = LevelSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(""));
    }

    #[test]
    fn test_grant_from_levels() {
        let grant = UserAccessGrant::from_levels(["SECRET", "UNCLASSIFIED"], ["REL TO", "NOFORN"]);
        assert_eq!(grant.classification_levels.raw(), "SECRET,UNCLASSIFIED");
        assert!(grant.allows_classification("secret"));
        assert!(grant.allows_releasability("noforn"));
        assert!(!grant.allows_releasability("ORCON"));
    }

    #[test]
    fn test_grant_clearance() {
        let grant = UserAccessGrant::from_fields("TOP SECRET, SECRET", "NOFORN");
        assert_eq!(grant.clearance(), Tier::TopSecret);
        assert_eq!(UserAccessGrant::deny_all().clearance(), Tier::Unclassified);
    }

    #[test]
    fn test_grant_serializes_raw_fields() {
        let grant = UserAccessGrant::from_fields("SECRET, UNCLASSIFIED", "NOFORN");
        let json = serde_json::to_value(&grant).unwrap();
        assert_eq!(json["classification_levels"], "SECRET, UNCLASSIFIED");

        let back: UserAccessGrant = serde_json::from_value(json).unwrap();
        assert_eq!(back, grant);
        assert!(back.allows_classification("unclassified"));
    }
}
