//! Post payloads and the create-post batch.
//!
//! - [`PostDetails`] is the per-destination payload edited in the dashboard
//!   (flair, title, tags).
//! - [`CreatePost`] holds the batch-wide fields shared by every destination.
//! - [`PostRequest`] is one resolved request in the submitted batch.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::PostConfig;
use crate::types::destination::FeedEntry;
use crate::types::tag::Tag;

/// Tags carried by a post. There are only three kinds, so they stay inline.
pub type Tags = SmallVec<[Tag; 3]>;

/// Per-destination post metadata.
///
/// # Examples
///
/// ```
/// use pd_core::{FeedEntry, Flair, PostDetails};
///
/// let mut entry = FeedEntry::new("art", "r/pics");
/// entry.flairs.push(Flair::named("OC"));
///
/// let details = PostDetails::for_entry(&entry, "n/a").with_title("Sunset");
/// assert_eq!(details.flair, "OC");
/// assert_eq!(details.title, "Sunset");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDetails {
    /// Chosen flair.
    pub flair: String,
    /// Post title; empty means "use the batch default".
    pub title: String,
    /// Post tags; empty means "use the batch default".
    pub tags: Tags,
}

impl PostDetails {
    /// Initial details for a destination: its first flair, or `fallback_flair`
    /// when it offers none.
    #[must_use]
    pub fn for_entry(entry: &FeedEntry, fallback_flair: &str) -> Self {
        Self {
            flair: entry.first_flair().unwrap_or(fallback_flair).to_owned(),
            ..Self::default()
        }
    }

    /// Sets the flair.
    #[must_use]
    pub fn with_flair(mut self, flair: impl Into<String>) -> Self {
        self.flair = flair.into();
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }
}

/// Batch-wide fields of a create-post action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePost {
    /// Comment posted under every submission.
    pub comment: String,
    /// Link to the image being posted.
    pub image_link: String,
    /// Title used where a destination has none.
    pub default_title: String,
    /// Tags used where a destination has none.
    pub default_tags: Tags,
    /// Minutes from submission until the post goes out.
    pub delay_minutes: u32,
}

impl CreatePost {
    /// Builds the batch fields from configuration defaults.
    #[must_use]
    pub fn from_config(config: &PostConfig) -> Self {
        Self {
            comment: config.comment.clone(),
            image_link: config.image_link.clone(),
            default_title: config.default_title.clone(),
            default_tags: config.default_tags.clone(),
            delay_minutes: config.delay_minutes,
        }
    }

    /// Resolves one destination's details against the batch defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use pd_core::{CreatePost, PostDetails, Tag};
    ///
    /// let batch = CreatePost {
    ///     default_title: "Weekly drop".to_owned(),
    ///     default_tags: [Tag::Oc].into_iter().collect(),
    ///     ..CreatePost::default()
    /// };
    /// let request = batch.request("art", "r/pics", &PostDetails::default().with_flair("OC"));
    /// assert_eq!(request.title, "Weekly drop");
    /// assert_eq!(request.tags.as_slice(), &[Tag::Oc]);
    /// ```
    #[must_use]
    pub fn request(&self, category: &str, destination: &str, details: &PostDetails) -> PostRequest {
        let title = if details.title.is_empty() {
            &self.default_title
        } else {
            &details.title
        };
        let tags = if details.tags.is_empty() {
            &self.default_tags
        } else {
            &details.tags
        };
        PostRequest {
            destination: destination.to_owned(),
            category: category.to_owned(),
            title: title.clone(),
            flair: details.flair.clone(),
            tags: tags.clone(),
            comment: self.comment.clone(),
            image_link: self.image_link.clone(),
            delay_minutes: self.delay_minutes,
        }
    }
}

/// One fully resolved request of a create-post batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRequest {
    /// Destination name.
    pub destination: String,
    /// Category the destination was selected from.
    pub category: String,
    /// Resolved title.
    pub title: String,
    /// Chosen flair.
    pub flair: String,
    /// Resolved tags.
    pub tags: Tags,
    /// Batch comment.
    pub comment: String,
    /// Batch image link.
    pub image_link: String,
    /// Minutes until the post goes out.
    pub delay_minutes: u32,
}
