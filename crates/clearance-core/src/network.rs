//! Network gating by classification tier.
//!
//! Unlike the item policy, networks carry a single label and are compared
//! against a single user tier. Releasability plays no part.

use crate::records::Network;
use crate::tier::{can_access, Tier};

/// Check whether a user at `user_tier` may open `network`.
pub fn network_visible(network: &Network, user_tier: Tier) -> bool {
    can_access(network.tier(), user_tier)
}

/// Keep the networks a user at `user_tier` may open, preserving order.
pub fn visible_networks<I>(networks: I, user_tier: Tier) -> Vec<Network>
where
    I: IntoIterator<Item = Network>,
{
    networks
        .into_iter()
        .filter(|network| network_visible(network, user_tier))
        .collect()
}

/// Networks offered when the store has none.
pub fn default_networks() -> Vec<Network> {
    vec![
        Network::new("default", "Angola Intelligence Network", "unclassified")
            .with_description("Default intelligence network with entities and relationships"),
        Network::new("network-2", "HUMINT Collection Network", "secret")
            .with_description("Human Intelligence collection network with sources and agents"),
        Network::new("network-3", "Critical Infrastructure Network", "secret")
            .with_description("Network of critical infrastructure assets and vulnerabilities"),
        Network::new("network-4", "Special Operations Network", "top_secret")
            .with_description("Special operations network with classified missions"),
    ]
}
