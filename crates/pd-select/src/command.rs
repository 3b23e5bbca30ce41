//! Serializable commands covering every store mutation.
//!
//! UI event handlers (or scripts) describe what they want as a [`Command`] and
//! hand it to [`SelectionHandle::apply`](crate::SelectionHandle::apply).
//!
//! # Command Flow
//!
//! ```text
//! Click/Script → Command → SelectionHandle::apply → transition → Snapshot
//! ```
//!
//! Commands serialize as internally tagged JSON objects:
//!
//! ```
//! use pd_select::Command;
//!
//! let json = r#"{"op": "select_item", "section": "art", "item": "r/pics"}"#;
//! let cmd: Command<u32> = serde_json::from_str(json).unwrap();
//! assert_eq!(cmd, Command::SelectItem { section: "art".into(), item: "r/pics".into() });
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SelectError;
use crate::item::{Item, RawItem};
use crate::section::Section;
use crate::store::SelectionStore;

/// A single mutation request against a selection store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command<P> {
    /// Toggle one item.
    SelectItem {
        /// Section name.
        section: String,
        /// Item name.
        item: String,
    },

    /// Set one item's flag.
    SetItemSelected {
        /// Section name.
        section: String,
        /// Item name.
        item: String,
        /// New flag.
        selected: bool,
    },

    /// Replace one item's payload.
    SetItemProperties {
        /// Section name.
        section: String,
        /// Item name.
        item: String,
        /// New payload.
        properties: P,
    },

    /// Tri-state select-all within a section.
    SelectAllInSection {
        /// Section name.
        section: String,
    },

    /// Tri-state select-all in every section.
    SelectAll,

    /// Append a new unselected item.
    AddItem {
        /// Section name; created if missing.
        section: String,
        /// Item name.
        item: String,
        /// Initial payload.
        #[serde(default)]
        properties: P,
    },

    /// Remove an item.
    RemoveItem {
        /// Section name.
        section: String,
        /// Item name.
        item: String,
    },

    /// Rename a section.
    RenameSection {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },

    /// Rename an item within its section.
    RenameItem {
        /// Section name.
        section: String,
        /// Current item name.
        from: String,
        /// New item name.
        to: String,
    },

    /// Replace the items of a section.
    SetSectionItems {
        /// Section name.
        section: String,
        /// Replacement items, in order.
        items: Vec<Item<P>>,
    },

    /// Replace every section.
    SetSections {
        /// Replacement sections, in order.
        sections: Vec<Section<P>>,
    },

    /// Reconcile against a fresh raw list.
    Reconcile {
        /// The fresh list.
        items: Vec<RawItem<P>>,
    },
}

impl<P> Command<P> {
    /// Returns the snake-case operation name, as used in the `op` tag.
    ///
    /// ```
    /// use pd_select::Command;
    ///
    /// assert_eq!(Command::<()>::SelectAll.name(), "select_all");
    /// ```
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelectItem { .. } => "select_item",
            Self::SetItemSelected { .. } => "set_item_selected",
            Self::SetItemProperties { .. } => "set_item_properties",
            Self::SelectAllInSection { .. } => "select_all_in_section",
            Self::SelectAll => "select_all",
            Self::AddItem { .. } => "add_item",
            Self::RemoveItem { .. } => "remove_item",
            Self::RenameSection { .. } => "rename_section",
            Self::RenameItem { .. } => "rename_item",
            Self::SetSectionItems { .. } => "set_section_items",
            Self::SetSections { .. } => "set_sections",
            Self::Reconcile { .. } => "reconcile",
        }
    }
}

impl<P: Clone + Default> Command<P> {
    /// Runs the matching pure transition against `store`.
    ///
    /// # Errors
    ///
    /// Returns whatever [`SelectError`] the transition reports.
    pub fn apply_to(self, store: &SelectionStore<P>) -> Result<SelectionStore<P>, SelectError> {
        match self {
            Self::SelectItem { section, item } => store.select_item(&section, &item),
            Self::SetItemSelected {
                section,
                item,
                selected,
            } => store.set_item_selected(&section, &item, selected),
            Self::SetItemProperties {
                section,
                item,
                properties,
            } => store.set_item_properties(&section, &item, properties),
            Self::SelectAllInSection { section } => store.select_all_in_section(&section),
            Self::SelectAll => Ok(store.select_all()),
            Self::AddItem {
                section,
                item,
                properties,
            } => store.add_item(&section, &item, properties),
            Self::RemoveItem { section, item } => store.remove_item(&section, &item),
            Self::RenameSection { from, to } => store.rename_section(&from, &to),
            Self::RenameItem { section, from, to } => store.rename_item(&section, &from, &to),
            Self::SetSectionItems { section, items } => store.set_section_items(&section, items),
            Self::SetSections { sections } => store.set_sections(sections),
            Self::Reconcile { items } => Ok(store.reconcile(items)),
        }
    }
}
