//! Ordered classification tiers used to gate knowledge-graph networks.
//!
//! Tiers are a closed three-value system. Every string maps to a tier and
//! anything unrecognized collapses to [`Tier::Unclassified`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize::compact_label;

/// A classification tier.
///
/// Variant order defines the hierarchy: `Unclassified < Secret < TopSecret`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Unclassified,
    Secret,
    TopSecret,
}

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Tier; 3] = [Tier::Unclassified, Tier::Secret, Tier::TopSecret];

    /// Map an arbitrary label onto a tier.
    ///
    /// The label is compacted (lowercased, separators removed) and then tested
    /// by substring: `"topsecret"` wins over `"secret"`. The test is
    /// deliberately loose, so `"not secret enough"` is [`Tier::Secret`].
    pub fn normalize(raw: &str) -> Self {
        let compact = compact_label(raw);
        if compact.contains("topsecret") {
            Tier::TopSecret
        } else if compact.contains("secret") {
            Tier::Secret
        } else {
            Tier::Unclassified
        }
    }

    /// Derive a user's clearance from their raw classification field.
    ///
    /// The field is the comma-joined grant string (e.g. `"SECRET, UNCLASSIFIED"`).
    /// A field mentioning both `top` and `secret` anywhere is top secret.
    pub fn clearance_of(field: &str) -> Self {
        let lower = field.to_lowercase();
        if lower.contains("top") && lower.contains("secret") {
            Tier::TopSecret
        } else if lower.contains("secret") {
            Tier::Secret
        } else {
            Tier::Unclassified
        }
    }

    /// Numeric rank: 0, 1, 2.
    pub fn rank(self) -> u8 {
        match self {
            Tier::Unclassified => 0,
            Tier::Secret => 1,
            Tier::TopSecret => 2,
        }
    }

    /// Check whether a user at this tier may access a resource at `resource`.
    pub fn may_access(self, resource: Tier) -> bool {
        can_access(resource, self)
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Unclassified => "Unclassified",
            Tier::Secret => "Secret",
            Tier::TopSecret => "Top Secret",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for Tier {
    fn from(raw: &str) -> Self {
        Tier::normalize(raw)
    }
}

/// Decide whether a user tier may access a resource tier.
///
/// Top secret users see everything; otherwise access requires the user's
/// rank to be at least the resource's rank.
pub fn can_access(resource: Tier, user: Tier) -> bool {
    if user == Tier::TopSecret {
        return true;
    }
    user.rank() >= resource.rank()
}
