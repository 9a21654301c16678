//! Search, selection and sorting over an already access-filtered feed list.
//!
//! This runs after [`crate::policy::filter_accessible`]. It can only narrow
//! and reorder what the user was already allowed to see.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::records::DataFeed;

/// Field used to order the feed list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    #[default]
    Timestamp,
    SecurityClassification,
    Releasability,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// User-controlled view over the feed list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    /// Case-insensitive substring searched in title and content.
    pub search: String,

    /// Exact classification to keep, `None` for all.
    pub classification: Option<String>,

    /// Exact releasability to keep, `None` for all.
    pub releasability: Option<String>,

    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl FeedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn classification(mut self, label: impl Into<String>) -> Self {
        self.classification = Some(label.into());
        self
    }

    pub fn releasability(mut self, label: impl Into<String>) -> Self {
        self.releasability = Some(label.into());
        self
    }

    pub fn sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    /// Restore every setting to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check whether a feed passes search and selection.
    pub fn matches(&self, feed: &DataFeed) -> bool {
        let matches_search = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            feed.title.to_lowercase().contains(&needle)
                || feed
                    .content
                    .as_deref()
                    .is_some_and(|content| content.to_lowercase().contains(&needle))
        };

        let matches_classification = self
            .classification
            .as_deref()
            .map_or(true, |c| feed.security_classification == c);

        let matches_releasability = self
            .releasability
            .as_deref()
            .map_or(true, |r| feed.releasability == r);

        matches_search && matches_classification && matches_releasability
    }

    fn compare(&self, a: &DataFeed, b: &DataFeed) -> Ordering {
        let ordering = match self.sort_field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
            SortField::SecurityClassification => {
                a.security_classification.cmp(&b.security_classification)
            }
            SortField::Releasability => a.releasability.cmp(&b.releasability),
        };

        match self.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Filter then stable-sort a feed list.
    pub fn apply(&self, feeds: impl IntoIterator<Item = DataFeed>) -> Vec<DataFeed> {
        let mut result: Vec<DataFeed> = feeds.into_iter().filter(|f| self.matches(f)).collect();
        result.sort_by(|a, b| self.compare(a, b));
        result
    }
}
