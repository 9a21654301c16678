//! Per-item access policy.
//!
//! An item is visible to a user iff its classification matches one of the
//! user's classification levels AND its releasability matches one of the
//! user's releasability levels. Matching is exact after uppercasing and
//! trimming. There are no wildcards and no partial matches.

use crate::grant::UserAccessGrant;

/// Anything carrying a classification and a releasability tag.
pub trait Classified {
    /// The item's security classification (e.g. `"SECRET"`).
    fn classification(&self) -> &str;

    /// The item's releasability tag (e.g. `"NOFORN"`).
    fn releasability(&self) -> &str;
}

impl<T: Classified + ?Sized> Classified for &T {
    fn classification(&self) -> &str {
        (**self).classification()
    }

    fn releasability(&self) -> &str {
        (**self).releasability()
    }
}

/// A bare classification/releasability pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentLabel {
    pub classification: String,
    pub releasability: String,
}

impl ContentLabel {
    pub fn new(classification: impl Into<String>, releasability: impl Into<String>) -> Self {
        Self {
            classification: classification.into(),
            releasability: releasability.into(),
        }
    }
}

impl Classified for ContentLabel {
    fn classification(&self) -> &str {
        &self.classification
    }

    fn releasability(&self) -> &str {
        &self.releasability
    }
}

/// Outcome of evaluating one item against one grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    /// The item's classification is in the grant.
    pub classification_granted: bool,

    /// The item's releasability is in the grant.
    pub releasability_granted: bool,
}

impl AccessDecision {
    /// A decision that denies on both counts.
    pub const DENIED: AccessDecision = AccessDecision {
        classification_granted: false,
        releasability_granted: false,
    };

    /// Both conditions hold.
    pub fn is_granted(&self) -> bool {
        self.classification_granted && self.releasability_granted
    }
}

/// Evaluate an item and report which conditions held.
pub fn explain<T: Classified + ?Sized>(grant: &UserAccessGrant, item: &T) -> AccessDecision {
    AccessDecision {
        classification_granted: grant.allows_classification(item.classification()),
        releasability_granted: grant.allows_releasability(item.releasability()),
    }
}

/// Decide whether `item` is visible under `grant`.
pub fn is_accessible<T: Classified + ?Sized>(grant: &UserAccessGrant, item: &T) -> bool {
    explain(grant, item).is_granted()
}

/// Keep the items visible under `grant`, preserving input order.
pub fn filter_accessible<T, I>(grant: &UserAccessGrant, items: I) -> Vec<T>
where
    T: Classified,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .filter(|item| is_accessible(grant, item))
        .collect()
}

/// Like [`filter_accessible`], but an unresolved grant denies everything.
pub fn filter_accessible_or_deny<T, I>(grant: Option<&UserAccessGrant>, items: I) -> Vec<T>
where
    T: Classified,
    I: IntoIterator<Item = T>,
{
    match grant {
        Some(grant) => filter_accessible(grant, items),
        None => Vec::new(),
    }
}
