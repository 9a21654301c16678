//! Dashboard widget permissions.
//!
//! Widget access is a plain allow list: a user may show a widget instance iff
//! an enabled permission row names it. No rows means no widgets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Widget families that can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Weather,
    Crypto,
    Rss,
    News,
}

impl WidgetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Weather => "weather",
            WidgetKind::Crypto => "crypto",
            WidgetKind::Rss => "rss",
            WidgetKind::News => "news",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weather" => Ok(WidgetKind::Weather),
            "crypto" => Ok(WidgetKind::Crypto),
            "rss" => Ok(WidgetKind::Rss),
            "news" => Ok(WidgetKind::News),
            other => Err(CoreError::UnknownWidgetKind(other.to_string())),
        }
    }
}

/// A row of the `widget_permissions` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPermission {
    pub username: String,
    pub widget_type: WidgetKind,
    pub widget_instance: String,
    pub is_enabled: bool,
}

impl WidgetPermission {
    pub fn enabled(
        username: impl Into<String>,
        widget_type: WidgetKind,
        widget_instance: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            widget_type,
            widget_instance: widget_instance.into(),
            is_enabled: true,
        }
    }

    fn same_entry(&self, other: &WidgetPermission) -> bool {
        self.widget_type == other.widget_type
            && self.widget_instance == other.widget_instance
            && self.is_enabled == other.is_enabled
    }
}

/// News feed instances checked by [`WidgetPermissions::has_any_news_feed`].
pub const NEWS_FEED_INSTANCES: [&str; 2] = ["feed1", "feed2"];

/// A deduplicated set of widget permissions for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetPermissions {
    entries: Vec<WidgetPermission>,
}

impl WidgetPermissions {
    /// Build from raw rows, keeping the first of each
    /// `(widget_type, widget_instance, is_enabled)` triple.
    pub fn new(rows: impl IntoIterator<Item = WidgetPermission>) -> Self {
        let mut entries: Vec<WidgetPermission> = Vec::new();
        for row in rows {
            if !entries.iter().any(|seen| seen.same_entry(&row)) {
                entries.push(row);
            }
        }
        Self { entries }
    }

    /// Check for an enabled permission on a widget instance.
    pub fn has_permission(&self, kind: WidgetKind, instance: &str) -> bool {
        self.entries
            .iter()
            .any(|p| p.widget_type == kind && p.widget_instance == instance && p.is_enabled)
    }

    /// True if either news feed is enabled.
    pub fn has_any_news_feed(&self) -> bool {
        NEWS_FEED_INSTANCES
            .iter()
            .any(|instance| self.has_permission(WidgetKind::News, instance))
    }

    /// Enabled instances grouped by kind, in first-seen order.
    pub fn enabled_by_kind(&self) -> Vec<(WidgetKind, Vec<String>)> {
        let mut groups: Vec<(WidgetKind, Vec<String>)> = Vec::new();
        for p in self.entries.iter().filter(|p| p.is_enabled) {
            let idx = match groups.iter().position(|(kind, _)| *kind == p.widget_type) {
                Some(idx) => idx,
                None => {
                    groups.push((p.widget_type, Vec::new()));
                    groups.len() - 1
                }
            };
            let instances = &mut groups[idx].1;
            if !instances.contains(&p.widget_instance) {
                instances.push(p.widget_instance.clone());
            }
        }
        groups
    }

    pub fn entries(&self) -> &[WidgetPermission] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled(kind: WidgetKind, instance: &str) -> WidgetPermission {
        WidgetPermission {
            is_enabled: false,
            ..WidgetPermission::enabled("user1", kind, instance)
        }
    }

    #[test]
    fn test_empty_denies() {
        let perms = WidgetPermissions::default();
        assert!(!perms.has_permission(WidgetKind::Weather, "dubai"));
        assert!(!perms.has_any_news_feed());
    }

    #[test]
    fn test_dedup_keeps_first() {
        let perms = WidgetPermissions::new(vec![
            WidgetPermission::enabled("user1", WidgetKind::Crypto, "btc"),
            WidgetPermission::enabled("user1", WidgetKind::Crypto, "btc"),
            disabled(WidgetKind::Crypto, "btc"),
        ]);
        assert_eq!(perms.len(), 2);
        assert!(perms.has_permission(WidgetKind::Crypto, "btc"));
    }

    #[test]
    fn test_disabled_row_does_not_grant() {
        let perms = WidgetPermissions::new(vec![disabled(WidgetKind::News, "feed1")]);
        assert!(!perms.has_permission(WidgetKind::News, "feed1"));
        assert!(!perms.has_any_news_feed());
    }

    #[test]
    fn test_news_feed_check() {
        let perms = WidgetPermissions::new(vec![WidgetPermission::enabled(
            "user1",
            WidgetKind::News,
            "feed2",
        )]);
        assert!(perms.has_any_news_feed());
    }

    #[test]
    fn test_enabled_by_kind() {
        let perms = WidgetPermissions::new(vec![
            WidgetPermission::enabled("user1", WidgetKind::Weather, "dubai"),
            WidgetPermission::enabled("user1", WidgetKind::Rss, "bbc"),
            disabled(WidgetKind::Weather, "abu_dhabi"),
            WidgetPermission::enabled("user1", WidgetKind::Weather, "abu_dhabi"),
        ]);

        let groups = perms.enabled_by_kind();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, WidgetKind::Weather);
        assert_eq!(groups[0].1, vec!["dubai", "abu_dhabi"]);
        assert_eq!(groups[1], (WidgetKind::Rss, vec!["bbc".to_string()]));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("rss".parse::<WidgetKind>().unwrap(), WidgetKind::Rss);
        assert!("stocks".parse::<WidgetKind>().is_err());
    }
}
