//! The selection store and its transitions.
//!
//! [`SelectionStore`] is an immutable value. Every mutating operation takes
//! `&self` and returns a brand new store, so any holder of an older store keeps
//! observing the old state. Sections are shared between stores through [`Arc`];
//! a transition copies only the section it actually touches.
//!
//! Transitions never publish anything. Use
//! [`SelectionHandle`](crate::SelectionHandle) to get change notification on top.
//!
//! # Examples
//!
//! ```
//! use pd_select::SelectionStore;
//!
//! let store: SelectionStore<()> = SelectionStore::new();
//! let store = store.add_item("art", "r/pics", ()).unwrap();
//! let store = store.add_item("art", "r/art", ()).unwrap();
//! let next = store.select_item("art", "r/pics").unwrap();
//!
//! assert!(next.section("art").unwrap().is_indeterminate());
//! // The original value is untouched.
//! assert!(!store.is_any_item_checked());
//! ```

use std::sync::Arc;

use pd_core::fx_hash_set_with_capacity;
use serde::Serialize;
use tracing::debug;

use crate::error::SelectError;
use crate::item::{Item, ItemKey, RawItem};
use crate::section::Section;

/// An ordered collection of uniquely named sections.
///
/// Invariants held after every successful transition:
///
/// - section names are unique;
/// - item names are unique within their section;
/// - all derived state is computed from item flags on demand.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionStore<P> {
    pub(crate) sections: Vec<Arc<Section<P>>>,
}

impl<P> Clone for SelectionStore<P> {
    fn clone(&self) -> Self {
        Self {
            sections: self.sections.iter().map(Arc::clone).collect(),
        }
    }
}

impl<P> Default for SelectionStore<P> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

fn validate_name(kind: &'static str, name: &str) -> Result<(), SelectError> {
    if name.is_empty() {
        return Err(SelectError::InvalidName { kind });
    }
    Ok(())
}

// =============================================================================
// QUERIES
// =============================================================================

impl<P> SelectionStore<P> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over the sections in store order.
    pub fn sections(&self) -> impl Iterator<Item = &Section<P>> {
        self.sections.iter().map(Arc::as_ref)
    }

    /// Looks up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section<P>> {
        self.sections().find(|section| section.name() == name)
    }

    /// Looks up an item by identity.
    #[must_use]
    pub fn item(&self, section: &str, item: &str) -> Option<&Item<P>> {
        self.section(section).and_then(|s| s.item(item))
    }

    /// Returns `true` if the identity exists in the store.
    #[must_use]
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.item(&key.section, &key.item).is_some()
    }

    /// Returns the number of sections.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the store has no sections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the total number of items across all sections.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.sections().map(Section::len).sum()
    }

    /// Returns `true` if any section reports [`Section::is_any_selected`].
    ///
    /// Because an empty section is vacuously all-selected, a store holding an
    /// empty section answers `true` here.
    #[must_use]
    pub fn is_any_item_checked(&self) -> bool {
        self.sections().any(Section::is_any_selected)
    }

    /// Iterates over the sections for which [`Section::is_any_selected`] holds.
    pub fn selected_sections(&self) -> impl Iterator<Item = &Section<P>> {
        self.sections().filter(|section| section.is_any_selected())
    }

    /// Returns the selected items of one section, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NotFound`] if the section does not exist.
    pub fn selected_items(&self, section: &str) -> Result<Vec<&Item<P>>, SelectError> {
        self.section(section)
            .map(|s| s.selected_items().collect())
            .ok_or_else(|| SelectError::section_not_found(section))
    }

    /// Iterates over every selected item, in section-then-item order.
    pub fn all_checked(&self) -> impl Iterator<Item = (&Section<P>, &Item<P>)> {
        self.sections()
            .flat_map(|section| section.selected_items().map(move |item| (section, item)))
    }

    /// Returns the identities of every selected item, in store order.
    #[must_use]
    pub fn checked_keys(&self) -> Vec<ItemKey> {
        self.all_checked()
            .map(|(section, item)| ItemKey::new(section.name(), item.name.as_str()))
            .collect()
    }

    /// Returns the number of selected items.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.all_checked().count()
    }

    fn section_index(&self, name: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.name() == name)
    }
}

// =============================================================================
// TRANSITIONS
// =============================================================================

impl<P: Clone> SelectionStore<P> {
    /// Copies one section, lets `update` modify the copy, and returns a store
    /// holding the result. The other sections are shared with `self`.
    fn update_section<F>(&self, name: &str, update: F) -> Result<Self, SelectError>
    where
        F: FnOnce(&mut Section<P>) -> Result<(), SelectError>,
    {
        let index = self
            .section_index(name)
            .ok_or_else(|| SelectError::section_not_found(name))?;
        let mut section = Section::clone(&self.sections[index]);
        update(&mut section)?;

        let mut sections = self.sections.clone();
        sections[index] = Arc::new(section);
        Ok(Self { sections })
    }

    fn update_item<F>(&self, section: &str, item: &str, update: F) -> Result<Self, SelectError>
    where
        F: FnOnce(&mut Item<P>),
    {
        self.update_section(section, |s| {
            let position = s
                .position(item)
                .ok_or_else(|| SelectError::item_not_found(section, item))?;
            update(&mut s.items_mut()[position]);
            Ok(())
        })
    }

    /// Toggles the selection flag of one item.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NotFound`] if the item does not exist.
    pub fn select_item(&self, section: &str, item: &str) -> Result<Self, SelectError> {
        self.update_item(section, item, |item| item.selected = !item.selected)
    }

    /// Sets the selection flag of one item.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NotFound`] if the item does not exist.
    pub fn set_item_selected(
        &self,
        section: &str,
        item: &str,
        selected: bool,
    ) -> Result<Self, SelectError> {
        self.update_item(section, item, |item| item.selected = selected)
    }

    /// Replaces the payload of one item.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NotFound`] if the item does not exist.
    pub fn set_item_properties(
        &self,
        section: &str,
        item: &str,
        properties: P,
    ) -> Result<Self, SelectError> {
        self.update_item(section, item, |item| item.properties = properties)
    }

    /// Tri-state select-all for one section.
    ///
    /// From a mixed state every item becomes selected. From a fully selected or
    /// fully unselected state every item's flag is flipped.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NotFound`] if the section does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use pd_select::{RawItem, SelectionStore};
    ///
    /// let store: SelectionStore<()> = SelectionStore::from_raw(vec![
    ///     RawItem::new("s", "a").with_selected(true),
    ///     RawItem::new("s", "b"),
    /// ]);
    /// let store = store.select_all_in_section("s").unwrap();
    /// assert!(store.section("s").unwrap().is_all_selected());
    /// let store = store.select_all_in_section("s").unwrap();
    /// assert_eq!(store.selected_count(), 0);
    /// ```
    pub fn select_all_in_section(&self, section: &str) -> Result<Self, SelectError> {
        self.update_section(section, |s| {
            toggle_section(s);
            Ok(())
        })
    }

    /// Applies [`select_all_in_section`](Self::select_all_in_section) to every
    /// section, each according to its own current state.
    #[must_use]
    pub fn select_all(&self) -> Self {
        let sections = self
            .sections
            .iter()
            .map(|section| {
                let mut section = Section::clone(section);
                toggle_section(&mut section);
                Arc::new(section)
            })
            .collect();
        Self { sections }
    }

    /// Appends a new unselected item, creating the section if needed.
    ///
    /// New sections are appended after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::DuplicateIdentity`] if the item already exists and
    /// [`SelectError::InvalidName`] if either name is empty.
    pub fn add_item(&self, section: &str, item: &str, properties: P) -> Result<Self, SelectError> {
        validate_name("section", section)?;
        validate_name("item", item)?;

        if self.section_index(section).is_none() {
            let mut sections = self.sections.clone();
            sections.push(Arc::new(Section::new(
                section,
                vec![Item::new(item, properties)],
            )));
            return Ok(Self { sections });
        }

        self.update_section(section, |s| {
            if s.contains(item) {
                return Err(SelectError::duplicate_item(section, item));
            }
            s.items_mut().push(Item::new(item, properties));
            Ok(())
        })
    }

    /// Removes one item. The section stays, even when it becomes empty.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NotFound`] if the item does not exist.
    pub fn remove_item(&self, section: &str, item: &str) -> Result<Self, SelectError> {
        self.update_section(section, |s| {
            let position = s
                .position(item)
                .ok_or_else(|| SelectError::item_not_found(section, item))?;
            s.items_mut().remove(position);
            Ok(())
        })
    }

    /// Renames a section, keeping its position and items.
    ///
    /// Renaming a section to its own name succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::DuplicateIdentity`] if another section already
    /// uses `new`, [`SelectError::NotFound`] if `old` does not exist and
    /// [`SelectError::InvalidName`] if `new` is empty.
    pub fn rename_section(&self, old: &str, new: &str) -> Result<Self, SelectError> {
        validate_name("section", new)?;
        if old != new && self.section_index(new).is_some() {
            return Err(SelectError::duplicate_section(new));
        }
        self.update_section(old, |s| {
            s.set_name(new.to_owned());
            Ok(())
        })
    }

    /// Renames an item within its section, keeping its flag and payload.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NotFound`] if the item does not exist,
    /// [`SelectError::DuplicateIdentity`] if the section already holds `new`
    /// and [`SelectError::InvalidName`] if `new` is empty.
    pub fn rename_item(&self, section: &str, old: &str, new: &str) -> Result<Self, SelectError> {
        validate_name("item", new)?;
        self.update_section(section, |s| {
            let position = s
                .position(old)
                .ok_or_else(|| SelectError::item_not_found(section, old))?;
            if old != new && s.contains(new) {
                return Err(SelectError::duplicate_item(section, new));
            }
            s.items_mut()[position].name = new.to_owned();
            Ok(())
        })
    }

    /// Replaces every item of one section.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NotFound`] if the section does not exist,
    /// [`SelectError::DuplicateIdentity`] if `items` repeats a name and
    /// [`SelectError::InvalidName`] if an item name is empty.
    pub fn set_section_items(
        &self,
        section: &str,
        items: Vec<Item<P>>,
    ) -> Result<Self, SelectError> {
        validate_items(section, &items)?;
        self.update_section(section, |s| {
            *s.items_mut() = items;
            Ok(())
        })
    }

    /// Replaces every section at once, in the given order.
    ///
    /// Nothing is carried over from `self`; use
    /// [`reconcile`](Self::reconcile) to keep flags and payloads of known items.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::DuplicateIdentity`] if two sections share a name
    /// or a section repeats an item name, and [`SelectError::InvalidName`] if
    /// any name is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use pd_select::{Item, Section, SelectionStore};
    ///
    /// let store: SelectionStore<u32> = SelectionStore::new();
    /// let store = store
    ///     .set_sections(vec![
    ///         Section::new("art", vec![Item::new("r/pics", 1)]),
    ///         Section::new("tech", vec![Item::new("r/rust", 2).with_selected(true)]),
    ///     ])
    ///     .unwrap();
    /// assert_eq!(store.len(), 2);
    /// assert_eq!(store.selected_count(), 1);
    /// ```
    pub fn set_sections(&self, sections: Vec<Section<P>>) -> Result<Self, SelectError> {
        let mut seen = fx_hash_set_with_capacity(sections.len());
        for section in &sections {
            validate_name("section", section.name())?;
            if !seen.insert(section.name()) {
                return Err(SelectError::duplicate_section(section.name()));
            }
            validate_items(section.name(), section.items())?;
        }

        debug!(previous = self.len(), sections = sections.len(), "Replacing all sections");
        Ok(Self {
            sections: sections.into_iter().map(Arc::new).collect(),
        })
    }

    /// Exports the current state as a raw list.
    ///
    /// Every entry carries its section, flag and payload explicitly, so
    /// reconciling any store against this list keeps exactly these items.
    #[must_use]
    pub fn to_raw(&self) -> Vec<RawItem<P>> {
        self.sections()
            .flat_map(|section| {
                section.items().iter().map(move |item| RawItem {
                    section: Some(section.name().to_owned()),
                    name: item.name.clone(),
                    properties: Some(item.properties.clone()),
                    selected: Some(item.selected),
                })
            })
            .collect()
    }
}

fn validate_items<P>(section: &str, items: &[Item<P>]) -> Result<(), SelectError> {
    let mut seen = fx_hash_set_with_capacity(items.len());
    for item in items {
        validate_name("item", &item.name)?;
        if !seen.insert(item.name.as_str()) {
            return Err(SelectError::duplicate_item(section, &item.name));
        }
    }
    Ok(())
}

fn toggle_section<P>(section: &mut Section<P>) {
    let indeterminate = section.is_indeterminate();
    for item in section.items_mut() {
        item.selected = indeterminate || !item.selected;
    }
}
