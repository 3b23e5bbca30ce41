//! Item identity and payload types.
//!
//! An item is addressed by the pair (section name, item name). The store never
//! hands out mutable references to items: every change produces a new [`Item`]
//! value in a new store snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identity of an item across the whole store.
///
/// # Examples
///
/// ```
/// use pd_select::ItemKey;
///
/// let key = ItemKey::new("art", "r/pics");
/// assert_eq!(key.to_string(), "art/r/pics");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    /// Name of the containing section.
    pub section: String,
    /// Name of the item within its section.
    pub item: String,
}

impl ItemKey {
    /// Creates a new item key.
    #[must_use]
    pub fn new(section: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            item: item.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.section, self.item)
    }
}

/// A selectable entry carrying a selection flag and an opaque payload.
///
/// The section an item belongs to is implied by the [`Section`](crate::Section)
/// that holds it.
///
/// # Examples
///
/// ```
/// use pd_select::Item;
///
/// let item: Item<u32> = Item::new("r/pics", 7);
/// assert!(!item.selected);
/// assert_eq!(item.properties, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<P> {
    /// Item name, unique within its section.
    pub name: String,
    /// Whether the item is currently selected.
    #[serde(default)]
    pub selected: bool,
    /// Caller-defined payload.
    pub properties: P,
}

impl<P> Item<P> {
    /// Creates an unselected item.
    #[must_use]
    pub fn new(name: impl Into<String>, properties: P) -> Self {
        Self {
            name: name.into(),
            selected: false,
            properties,
        }
    }

    /// Returns a copy of this item with the given selection flag.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// One entry of a freshly fetched item list, as fed to reconciliation.
///
/// Only `name` is required. A missing `section` maps to
/// [`UNNAMED_SECTION`](crate::UNNAMED_SECTION); missing `properties` and
/// `selected` fall back to `P::default()` and `false` for items that did not
/// exist before.
///
/// # Examples
///
/// ```
/// use pd_select::RawItem;
///
/// let raw: RawItem<u32> = serde_json::from_str(r#"{"name": "r/pics"}"#).unwrap();
/// assert_eq!(raw.section, None);
/// assert_eq!(raw.selected, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem<P> {
    /// Section name, or `None` for the placeholder section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Item name.
    pub name: String,
    /// Initial payload for items that are new to the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<P>,
    /// Initial selection for items that are new to the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl<P> RawItem<P> {
    /// Creates a raw entry in the given section with no payload or selection.
    #[must_use]
    pub fn new(section: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            section: Some(section.into()),
            name: name.into(),
            properties: None,
            selected: None,
        }
    }

    /// Creates a raw entry without a section.
    #[must_use]
    pub fn unsectioned(name: impl Into<String>) -> Self {
        Self {
            section: None,
            name: name.into(),
            properties: None,
            selected: None,
        }
    }

    /// Sets the initial payload.
    #[must_use]
    pub fn with_properties(mut self, properties: P) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Sets the initial selection flag.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }
}
