//! Scenario vectors for access decisions.
//!
//! Fixed grant/item and resource/user pairs with their expected outcomes.
//! Any implementation of the two policies must agree with every vector.
//! [`vectors_json`] exports them for use outside Rust.

use serde::Serialize;

use clearance_core::{can_access, is_accessible, ContentLabel, Tier, UserAccessGrant};

/// An item policy vector.
#[derive(Debug, Clone, Serialize)]
pub struct AccessVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Raw comma-separated classification grant.
    pub classification_levels: &'static str,
    /// Raw comma-separated releasability grant.
    pub releasability_levels: &'static str,
    pub item_classification: &'static str,
    pub item_releasability: &'static str,
    pub expected: bool,
}

/// A tier policy vector. Labels go through `Tier::normalize` first.
#[derive(Debug, Clone, Serialize)]
pub struct TierVector {
    pub name: &'static str,
    pub resource: &'static str,
    pub user: &'static str,
    pub expected: bool,
}

/// Get all item policy vectors.
pub fn access_vectors() -> Vec<AccessVector> {
    const CLASS: &str = "SECRET, UNCLASSIFIED";
    const REL: &str = "REL TO, NOFORN";

    let v = |name, classification_levels, releasability_levels, class, rel, expected| {
        AccessVector {
            name,
            classification_levels,
            releasability_levels,
            item_classification: class,
            item_releasability: rel,
            expected,
        }
    };

    vec![
        v("both granted", CLASS, REL, "SECRET", "NOFORN", true),
        v("releasability not granted", CLASS, REL, "SECRET", "ORCON", false),
        v("classification not granted", CLASS, REL, "TOP SECRET", "NOFORN", false),
        v("case and padding ignored", CLASS, REL, "  secret ", "noforn", true),
        v("internal spacing kept", "TOP SECRET", "NOFORN", "TOP  SECRET", "NOFORN", false),
        v("punctuation kept", "TOP SECRET", "NOFORN", "TOP-SECRET", "NOFORN", false),
        v("no wildcard", "ALL", "ALL", "SECRET", "NOFORN", false),
        v("empty field denies real tags", "", "", "SECRET", "NOFORN", false),
        v("empty token matches empty tag", "SECRET,", "NOFORN,", "", " ", true),
        v("empty tag needs an empty token", CLASS, REL, "", "NOFORN", false),
        v("multi-word releasability", CLASS, REL, "UNCLASSIFIED", "rel to", true),
    ]
}

/// Get all tier policy vectors.
pub fn tier_vectors() -> Vec<TierVector> {
    let v = |name, resource, user, expected| TierVector {
        name,
        resource,
        user,
        expected,
    };

    vec![
        v("top secret user sees unclassified", "Unclassified", "Top_Secret", true),
        v("top secret user sees top secret", "TOP SECRET", "top-secret", true),
        v("secret user denied top secret", "top_secret", "SECRET", false),
        v("secret user sees secret", "secret", "Secret", true),
        v("unclassified sees unclassified", "unclassified", "UNCLASSIFIED", true),
        v("unclassified denied secret", "SECRET", "Unclassified", false),
        v("unknown label is unclassified", "", "garbage", true),
        v("loose substring match", "not secret enough", "Secretariat Briefing", true),
        v("suffixed top secret", "top-secret-ish", "secret", false),
    ]
}

fn check_access(vector: &AccessVector) -> bool {
    let grant =
        UserAccessGrant::from_fields(vector.classification_levels, vector.releasability_levels);
    let item = ContentLabel::new(vector.item_classification, vector.item_releasability);
    is_accessible(&grant, &item) == vector.expected
}

fn check_tier(vector: &TierVector) -> bool {
    can_access(Tier::normalize(vector.resource), Tier::normalize(vector.user)) == vector.expected
}

/// Verify every vector and report per-vector results as `(name, passed)`.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    let access = access_vectors()
        .into_iter()
        .map(|v| (v.name.to_string(), check_access(&v)));
    let tiers = tier_vectors()
        .into_iter()
        .map(|v| (v.name.to_string(), check_tier(&v)));

    access.chain(tiers).collect()
}

/// All vectors as a JSON document with `access` and `tier` arrays.
pub fn vectors_json() -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Document {
        access: Vec<AccessVector>,
        tier: Vec<TierVector>,
    }

    serde_json::to_string_pretty(&Document {
        access: access_vectors(),
        tier: tier_vectors(),
    })
}
