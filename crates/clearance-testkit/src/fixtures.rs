//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: three personas at the three
//! tiers, a small feed table that exercises every matching edge, and the
//! default networks.

use clearance::{access_record, Gatekeeper, GatekeeperConfig, Session};
use clearance_core::{default_networks, DataFeed, WidgetKind, WidgetPermission};
use clearance_store::{MemoryStore, Seed, StoreExt};

/// A login with a fixed grant.
#[derive(Debug, Clone, Copy)]
pub struct Persona {
    pub username: &'static str,
    pub password: &'static str,
    pub classification_levels: &'static str,
    pub releasability_levels: &'static str,
}

/// Cleared for everything.
pub const TOP_SECRET_USER: Persona = Persona {
    username: "user1",
    password: "alpha-pass",
    classification_levels: "TOP SECRET, SECRET, UNCLASSIFIED",
    releasability_levels: "REL TO, NOFORN",
};

/// Secret and below, no ORCON.
pub const SECRET_USER: Persona = Persona {
    username: "user2",
    password: "bravo-pass",
    classification_levels: "SECRET, UNCLASSIFIED",
    releasability_levels: "REL TO, NOFORN",
};

pub const UNCLASSIFIED_USER: Persona = Persona {
    username: "user3",
    password: "charlie-pass",
    classification_levels: "UNCLASSIFIED",
    releasability_levels: "REL TO",
};

pub const PERSONAS: [Persona; 3] = [TOP_SECRET_USER, SECRET_USER, UNCLASSIFIED_USER];

/// Build a feed row with the given tags.
pub fn feed(id: &str, classification: &str, releasability: &str, timestamp: i64) -> DataFeed {
    DataFeed {
        feed_id: id.to_string(),
        title: format!("Report {}", id),
        content: Some(format!("{} / {}", classification, releasability)),
        source: "HUMINT".to_string(),
        url: None,
        security_classification: classification.to_string(),
        releasability: releasability.to_string(),
        pir: None,
        feed_frequency: None,
        timestamp,
    }
}

/// Feeds covering exact, padded, lowercased and malformed tags.
pub fn sample_feeds() -> Vec<DataFeed> {
    vec![
        feed("ts-noforn", "TOP SECRET", "NOFORN", 6_000),
        feed("s-noforn", "SECRET", "NOFORN", 5_000),
        feed("s-orcon", "SECRET", "ORCON", 4_000),
        feed("u-relto", "  unclassified", "rel to ", 3_000),
        feed("ts-double-space", "TOP  SECRET", "NOFORN", 2_000),
        feed("ts-hyphen", "TOP-SECRET", "NOFORN", 1_000),
    ]
}

/// Everything the fixture store is seeded with.
pub fn sample_seed() -> Seed {
    Seed {
        user_access: PERSONAS
            .iter()
            .map(|p| {
                access_record(
                    p.username,
                    p.password,
                    p.classification_levels,
                    p.releasability_levels,
                )
            })
            .collect(),
        data_feeds: sample_feeds(),
        knowledge_graph_networks: default_networks(),
        widget_permissions: vec![
            WidgetPermission::enabled(SECRET_USER.username, WidgetKind::News, "feed1"),
            WidgetPermission::enabled(SECRET_USER.username, WidgetKind::Crypto, "btc"),
            WidgetPermission::enabled(SECRET_USER.username, WidgetKind::Crypto, "btc"),
        ],
    }
}

/// A test fixture with a gatekeeper over a seeded memory store.
pub struct TestFixture {
    pub gatekeeper: Gatekeeper<MemoryStore>,
}

impl TestFixture {
    /// Create a fixture seeded with [`sample_seed`].
    pub async fn new() -> Self {
        let fixture = Self::empty();
        fixture
            .gatekeeper
            .store()
            .import(&sample_seed())
            .await
            .expect("seeding memory store");
        fixture
    }

    /// Create a fixture with nothing in the store.
    pub fn empty() -> Self {
        Self {
            gatekeeper: Gatekeeper::new(MemoryStore::new(), GatekeeperConfig::default()),
        }
    }

    /// Log a persona in.
    pub async fn login(&self, persona: &Persona) -> Session {
        self.gatekeeper
            .login(persona.username, persona.password)
            .await
            .expect("persona login")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearance_core::Tier;

    fn ids(feeds: &[DataFeed]) -> Vec<&str> {
        feeds.iter().map(|f| f.feed_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fixture_persona_clearances() {
        let fixture = TestFixture::new().await;

        let tiers = [Tier::TopSecret, Tier::Secret, Tier::Unclassified];
        for (persona, tier) in PERSONAS.iter().zip(tiers) {
            assert_eq!(fixture.login(persona).await.clearance, tier);
        }
    }

    #[tokio::test]
    async fn test_fixture_feed_visibility() {
        let fixture = TestFixture::new().await;
        let gk = &fixture.gatekeeper;

        let top = gk.accessible_feeds(TOP_SECRET_USER.username).await.unwrap();
        assert_eq!(ids(&top), ["ts-noforn", "s-noforn", "u-relto"]);

        let secret = gk.accessible_feeds(SECRET_USER.username).await.unwrap();
        assert_eq!(ids(&secret), ["s-noforn", "u-relto"]);

        let unclassified = gk.accessible_feeds(UNCLASSIFIED_USER.username).await.unwrap();
        assert_eq!(ids(&unclassified), ["u-relto"]);
    }

    #[tokio::test]
    async fn test_empty_fixture_falls_back_to_default_networks() {
        let fixture = TestFixture::empty();
        let store = fixture.gatekeeper.store();
        store
            .import(&Seed {
                user_access: sample_seed().user_access,
                ..Seed::default()
            })
            .await
            .unwrap();

        let session = fixture.login(&UNCLASSIFIED_USER).await;
        let networks = fixture.gatekeeper.visible_networks(&session).await.unwrap();
        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].id, "default");
    }

    #[tokio::test]
    async fn test_fixture_widgets() {
        let fixture = TestFixture::new().await;
        let session = fixture.login(&SECRET_USER).await;
        let perms = fixture.gatekeeper.widget_permissions(&session).await.unwrap();

        assert_eq!(perms.len(), 2);
        assert!(perms.has_any_news_feed());
        assert!(perms.has_permission(WidgetKind::Crypto, "btc"));
    }
}
