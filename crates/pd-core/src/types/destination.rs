//! Posting destinations as delivered by the destination feed.
//!
//! A feed is a JSON array of [`FeedEntry`] values, one per destination, each
//! optionally naming the category it is listed under.

use serde::{Deserialize, Serialize};

/// A flair offered by a destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flair {
    /// Display name, used as the flair value of a post.
    pub name: String,
    /// Whether the flair text can be edited by the poster.
    #[serde(default)]
    pub is_text_editable: bool,
    /// Destination-specific flair identifier.
    #[serde(default)]
    pub id: String,
}

impl Flair {
    /// Creates a non-editable flair with no identifier.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_text_editable: false,
            id: String::new(),
        }
    }
}

/// One destination in the feed.
///
/// # Examples
///
/// ```
/// use pd_core::FeedEntry;
///
/// let entry: FeedEntry = serde_json::from_str(
///     r#"{"category": "art", "name": "r/pics", "flairs": [{"name": "OC"}]}"#,
/// ).unwrap();
/// assert_eq!(entry.category.as_deref(), Some("art"));
/// assert_eq!(entry.flairs[0].name, "OC");
/// assert_eq!(entry.selected, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Category the destination is listed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Destination name.
    pub name: String,
    /// Flairs offered by the destination, in preference order.
    #[serde(default)]
    pub flairs: Vec<Flair>,
    /// Initial selection, for destinations the dashboard has not seen yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl FeedEntry {
    /// Creates an entry with no flairs.
    #[must_use]
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            name: name.into(),
            flairs: Vec::new(),
            selected: None,
        }
    }

    /// Returns the name of the first offered flair, if any.
    #[must_use]
    pub fn first_flair(&self) -> Option<&str> {
        self.flairs.first().map(|flair| flair.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flair_defaults() {
        let flair: Flair = serde_json::from_str(r#"{"name": "Meta"}"#).unwrap();
        assert_eq!(flair, Flair::named("Meta"));
    }

    #[test]
    fn test_first_flair() {
        let mut entry = FeedEntry::new("art", "r/pics");
        assert_eq!(entry.first_flair(), None);
        entry.flairs = vec![Flair::named("OC"), Flair::named("Meta")];
        assert_eq!(entry.first_flair(), Some("OC"));
    }

    #[test]
    fn test_entry_without_category() {
        let entry: FeedEntry = serde_json::from_str(r#"{"name": "r/misc"}"#).unwrap();
        assert!(entry.category.is_none());
        assert!(entry.flairs.is_empty());
    }
}
