//! Post tags.
//!
//! This module provides the [`Tag`] enum for the markers a post can carry on
//! its destination.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A marker attached to a post.
///
/// Serializes with the upper-case names destinations use.
///
/// # Examples
///
/// ```
/// use pd_core::Tag;
///
/// assert_eq!(serde_json::to_string(&Tag::Oc).unwrap(), r#""OC""#);
/// assert_eq!(Tag::Spoiler.label(), "SPOILER");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[non_exhaustive]
pub enum Tag {
    /// Original content.
    Oc,
    /// The post contains spoilers.
    Spoiler,
    /// Not safe for work.
    Nsfw,
}

impl Tag {
    /// All tags, in display order.
    pub const ALL: [Self; 3] = [Self::Oc, Self::Spoiler, Self::Nsfw];

    /// Returns the label used on the wire and in text output.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oc => "OC",
            Self::Spoiler => "SPOILER",
            Self::Nsfw => "NSFW",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_serialization_matches_label() {
        for tag in Tag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.label()));
            let parsed: Tag = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, tag);
        }
    }

    #[test]
    fn test_tag_rejects_lowercase() {
        assert!(serde_json::from_str::<Tag>(r#""oc""#).is_err());
    }
}
