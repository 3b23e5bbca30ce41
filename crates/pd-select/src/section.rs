//! Named groups of items.

use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::query::{self, SectionState};

/// A named, ordered group of items.
///
/// Item order is the order in which the most recent reconciliation (or later
/// additions) produced them; the store never re-sorts a section.
///
/// # Examples
///
/// ```
/// use pd_select::{Item, Section};
///
/// let section = Section::new("art", vec![Item::new("r/pics", ()).with_selected(true)]);
/// assert!(section.is_all_selected());
/// assert_eq!(section.selected_items().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<P> {
    name: String,
    items: Vec<Item<P>>,
}

impl<P> Section<P> {
    /// Creates a section from its name and items.
    #[must_use]
    pub fn new(name: impl Into<String>, items: Vec<Item<P>>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Returns the section name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the items in order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Item<P>] {
        &self.items
    }

    /// Returns the number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by name.
    #[must_use]
    pub fn item(&self, name: &str) -> Option<&Item<P>> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Returns `true` if an item with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item<P>> {
        &mut self.items
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// See [`query::is_all_selected`].
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        query::is_all_selected(&self.items)
    }

    /// See [`query::is_indeterminate`].
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        query::is_indeterminate(&self.items)
    }

    /// See [`query::is_any_selected`].
    #[must_use]
    pub fn is_any_selected(&self) -> bool {
        query::is_any_selected(&self.items)
    }

    /// See [`query::section_state`].
    #[must_use]
    pub fn state(&self) -> SectionState {
        query::section_state(&self.items)
    }

    /// Iterates over the selected items in order.
    pub fn selected_items(&self) -> impl Iterator<Item = &Item<P>> {
        self.items.iter().filter(|item| item.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> Section<u8> {
        Section::new(
            "art",
            vec![
                Item::new("a", 1).with_selected(true),
                Item::new("b", 2),
                Item::new("c", 3).with_selected(true),
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let section = section();
        assert_eq!(section.item("b").map(|item| item.properties), Some(2));
        assert!(section.item("z").is_none());
        assert!(section.contains("c"));
        assert_eq!(section.len(), 3);
    }

    #[test]
    fn test_selected_items_keep_order() {
        let section = section();
        let names: Vec<&str> = section
            .selected_items()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_state() {
        assert_eq!(section().state(), SectionState::Indeterminate);
        assert!(section().is_any_selected());
        let empty: Section<u8> = Section::new("empty", Vec::new());
        assert!(empty.is_empty());
        assert!(empty.is_all_selected());
        assert!(empty.is_any_selected());
    }
}
