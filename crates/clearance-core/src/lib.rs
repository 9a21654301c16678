//! # Clearance Core
//!
//! Pure access policy for Clearance: classification tiers, user grants, and
//! per-item classification/releasability matching.
//!
//! This crate contains no I/O, no storage, no networking.
//!
//! ## Two Policies
//!
//! - **Item policy** ([`policy`]): an item is visible iff its classification
//!   AND its releasability each exactly match (after uppercase/trim) one of
//!   the user's granted levels. Used for the data feed and for choosing the
//!   knowledge-base context of the AI chat.
//! - **Tier hierarchy** ([`tier`], [`network`]): labels collapse onto
//!   `Unclassified < Secret < TopSecret` and a user may open a network iff
//!   their tier is at least the network's tier. Releasability is ignored.
//!
//! The two are intentionally unrelated and share no permission trait.
//!
//! ## Usage
//!
//! ```rust
//! use clearance_core::{is_accessible, can_access, ContentLabel, Tier, UserAccessGrant};
//!
//! let grant = UserAccessGrant::from_fields("SECRET, UNCLASSIFIED", "REL TO, NOFORN");
//! assert!(is_accessible(&grant, &ContentLabel::new("SECRET", "NOFORN")));
//! assert!(!is_accessible(&grant, &ContentLabel::new("SECRET", "ORCON")));
//!
//! assert!(!can_access(Tier::TopSecret, grant.clearance()));
//! ```

pub mod error;
pub mod feed_view;
pub mod grant;
pub mod network;
pub mod normalize;
pub mod policy;
pub mod records;
pub mod tier;
pub mod widget;

pub use error::{CoreError, Result};
pub use feed_view::{FeedQuery, SortDirection, SortField};
pub use grant::{LevelSet, UserAccessGrant};
pub use network::{default_networks, network_visible, visible_networks};
pub use normalize::{compact_label, exact_label, split_levels};
pub use policy::{
    explain, filter_accessible, filter_accessible_or_deny, is_accessible, AccessDecision,
    Classified, ContentLabel,
};
pub use records::{DataFeed, Network, UserAccessRecord};
pub use tier::{can_access, Tier};
pub use widget::{WidgetKind, WidgetPermission, WidgetPermissions};
