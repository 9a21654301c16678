//! Proptest generators for property-based testing.

use proptest::prelude::*;

use clearance_core::{ContentLabel, DataFeed, Tier, UserAccessGrant};

/// Labels seen in real records.
pub const KNOWN_LABELS: [&str; 8] = [
    "TOP SECRET",
    "SECRET",
    "UNCLASSIFIED",
    "CONFIDENTIAL",
    "NOFORN",
    "REL TO",
    "ORCON",
    "FOUO",
];

/// Generate a level label: mostly known labels, sometimes arbitrary text.
///
/// Never contains a comma, so a generated label is always one token.
pub fn level_label() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::sample::select(KNOWN_LABELS.to_vec()).prop_map(String::from),
        1 => "[A-Za-z][A-Za-z _-]{0,14}",
    ]
}

/// Re-case and pad a label without changing its exact-match identity.
pub fn label_variant(label: String) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(any::<bool>(), label.chars().count()),
        0usize..3,
        0usize..3,
    )
        .prop_map(move |(upper, lead, trail)| {
            let body: String = label
                .chars()
                .zip(upper)
                .map(|(c, up)| {
                    if up {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect();
            format!("{}{}{}", " ".repeat(lead), body, " ".repeat(trail))
        })
}

/// Generate a Tier.
pub fn tier() -> impl Strategy<Value = Tier> {
    prop::sample::select(Tier::ALL.to_vec())
}

/// Generate a content label.
pub fn content_label() -> impl Strategy<Value = ContentLabel> {
    (level_label(), level_label()).prop_map(|(c, r)| ContentLabel::new(c, r))
}

/// Generate a feed with arbitrary tags and a small timestamp range, so ties
/// are common.
pub fn data_feed() -> impl Strategy<Value = DataFeed> {
    (
        "[a-z0-9]{1,8}",
        "[A-Za-z ]{0,16}",
        level_label(),
        level_label(),
        0i64..16,
    )
        .prop_map(|(id, title, class, rel, ts)| DataFeed {
            feed_id: id,
            title,
            content: None,
            source: "generated".to_string(),
            url: None,
            security_classification: class,
            releasability: rel,
            pir: None,
            feed_frequency: None,
            timestamp: ts,
        })
}

/// Parameters for an access check: a grant's level lists and some items.
#[derive(Debug, Clone)]
pub struct AccessParams {
    pub classification_levels: Vec<String>,
    pub releasability_levels: Vec<String>,
    pub items: Vec<ContentLabel>,
}

impl AccessParams {
    pub fn grant(&self) -> UserAccessGrant {
        UserAccessGrant::from_levels(&self.classification_levels, &self.releasability_levels)
    }
}

impl Arbitrary for AccessParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop::collection::vec(level_label(), 0..4),
            prop::collection::vec(level_label(), 0..4),
            prop::collection::vec(content_label(), 0..24),
        )
            .prop_map(|(classification_levels, releasability_levels, items)| AccessParams {
                classification_levels,
                releasability_levels,
                items,
            })
            .boxed()
    }
}

/// Reference membership check written directly against the level list.
pub fn reference_contains(levels: &[String], label: &str) -> bool {
    let label = label.trim().to_uppercase();
    levels.iter().any(|l| l.trim().to_uppercase() == label)
}
