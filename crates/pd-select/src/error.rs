//! Error types for the pd-select crate.
//!
//! Every error here is recoverable: a transition that fails leaves the store it
//! was called on untouched, and [`SelectionHandle`](crate::SelectionHandle)
//! republishes the unchanged snapshot.

use thiserror::Error;

/// Errors that can occur when mutating a [`SelectionStore`](crate::SelectionStore).
///
/// # Examples
///
/// ```
/// use pd_select::SelectError;
///
/// let err = SelectError::item_not_found("art", "r/pics");
/// assert_eq!(err.to_string(), "item 'r/pics' not found in section 'art'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SelectError {
    /// The addressed section or item does not exist in the current store.
    #[error("{}", describe("not found", .section, .item.as_deref()))]
    NotFound {
        /// Section that was addressed.
        section: String,
        /// Item that was addressed, if the operation targeted an item.
        item: Option<String>,
    },

    /// An add or rename would collide with an existing identity.
    #[error("{}", describe("already exists", .section, .item.as_deref()))]
    DuplicateIdentity {
        /// Section holding the colliding identity.
        section: String,
        /// Colliding item name, if the collision is at item level.
        item: Option<String>,
    },

    /// Section and item names must be non-empty.
    #[error("{kind} name must not be empty")]
    InvalidName {
        /// Which kind of name was rejected (`"section"` or `"item"`).
        kind: &'static str,
    },
}

fn describe(what: &str, section: &str, item: Option<&str>) -> String {
    match item {
        Some(item) => format!("item '{item}' {what} in section '{section}'"),
        None => format!("section '{section}' {what}"),
    }
}

impl SelectError {
    /// Creates a [`NotFound`](Self::NotFound) error for a missing section.
    #[must_use]
    pub fn section_not_found(section: &str) -> Self {
        Self::NotFound {
            section: section.to_owned(),
            item: None,
        }
    }

    /// Creates a [`NotFound`](Self::NotFound) error for a missing item.
    #[must_use]
    pub fn item_not_found(section: &str, item: &str) -> Self {
        Self::NotFound {
            section: section.to_owned(),
            item: Some(item.to_owned()),
        }
    }

    /// Creates a [`DuplicateIdentity`](Self::DuplicateIdentity) error for a section name.
    #[must_use]
    pub fn duplicate_section(section: &str) -> Self {
        Self::DuplicateIdentity {
            section: section.to_owned(),
            item: None,
        }
    }

    /// Creates a [`DuplicateIdentity`](Self::DuplicateIdentity) error for an item.
    #[must_use]
    pub fn duplicate_item(section: &str, item: &str) -> Self {
        Self::DuplicateIdentity {
            section: section.to_owned(),
            item: Some(item.to_owned()),
        }
    }

    /// Returns `true` for [`NotFound`](Self::NotFound).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`DuplicateIdentity`](Self::DuplicateIdentity).
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateIdentity { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            SelectError::section_not_found("art").to_string(),
            "section 'art' not found"
        );
        assert_eq!(
            SelectError::item_not_found("art", "r/pics").to_string(),
            "item 'r/pics' not found in section 'art'"
        );
    }

    #[test]
    fn test_duplicate_display() {
        assert_eq!(
            SelectError::duplicate_section("art").to_string(),
            "section 'art' already exists"
        );
        assert_eq!(
            SelectError::duplicate_item("art", "r/pics").to_string(),
            "item 'r/pics' already exists in section 'art'"
        );
    }

    #[test]
    fn test_invalid_name_display() {
        let err = SelectError::InvalidName { kind: "item" };
        assert_eq!(err.to_string(), "item name must not be empty");
    }

    #[test]
    fn test_predicates() {
        assert!(SelectError::section_not_found("a").is_not_found());
        assert!(!SelectError::section_not_found("a").is_duplicate());
        assert!(SelectError::duplicate_item("a", "b").is_duplicate());
    }
}
