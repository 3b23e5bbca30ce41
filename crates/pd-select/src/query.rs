//! Derived selection state.
//!
//! These functions compute section-level state from item flags on every call.
//! Nothing here is cached, so the derived state can never drift from the items.
//!
//! Note the empty-section edge case: an empty slice is vacuously all-selected,
//! and therefore also "any selected".

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// The tri-state of a section checkbox.
///
/// # Examples
///
/// ```
/// use pd_select::{Item, SectionState, section_state};
///
/// let items = [Item::new("a", ()).with_selected(true), Item::new("b", ())];
/// assert_eq!(section_state(&items), SectionState::Indeterminate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionState {
    /// No item is selected.
    Unselected,
    /// Some, but not all, items are selected.
    Indeterminate,
    /// Every item is selected (including the empty case).
    AllSelected,
}

impl SectionState {
    /// Returns a checkbox-style marker for text output.
    ///
    /// ```
    /// use pd_select::SectionState;
    ///
    /// assert_eq!(SectionState::Indeterminate.marker(), "[-]");
    /// ```
    #[inline]
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Unselected => "[ ]",
            Self::Indeterminate => "[-]",
            Self::AllSelected => "[x]",
        }
    }
}

/// Returns `true` if no item is unselected.
#[must_use]
pub fn is_all_selected<P>(items: &[Item<P>]) -> bool {
    items.iter().all(|item| item.selected)
}

/// Returns `true` if some but not all items are selected.
#[must_use]
pub fn is_indeterminate<P>(items: &[Item<P>]) -> bool {
    if is_all_selected(items) {
        return false;
    }
    items.iter().any(|item| item.selected)
}

/// Returns `is_indeterminate(items) || is_all_selected(items)`.
#[must_use]
pub fn is_any_selected<P>(items: &[Item<P>]) -> bool {
    is_indeterminate(items) || is_all_selected(items)
}

/// Classifies the items into a [`SectionState`].
#[must_use]
pub fn section_state<P>(items: &[Item<P>]) -> SectionState {
    if is_all_selected(items) {
        SectionState::AllSelected
    } else if is_indeterminate(items) {
        SectionState::Indeterminate
    } else {
        SectionState::Unselected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(flags: &[bool]) -> Vec<Item<()>> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &selected)| Item::new(format!("item{i}"), ()).with_selected(selected))
            .collect()
    }

    #[test]
    fn test_empty_section_is_vacuously_all_selected() {
        let empty = items(&[]);
        assert!(is_all_selected(&empty));
        assert!(!is_indeterminate(&empty));
        assert!(is_any_selected(&empty));
        assert_eq!(section_state(&empty), SectionState::AllSelected);
    }

    #[test]
    fn test_truth_table() {
        let cases: [(&[bool], bool, bool, bool); 4] = [
            (&[false, false], false, false, false),
            (&[true, false], false, true, true),
            (&[false, true], false, true, true),
            (&[true, true], true, false, true),
        ];
        for (flags, all, indeterminate, any) in cases {
            let items = items(flags);
            assert_eq!(is_all_selected(&items), all, "all for {flags:?}");
            assert_eq!(is_indeterminate(&items), indeterminate, "ind for {flags:?}");
            assert_eq!(is_any_selected(&items), any, "any for {flags:?}");
        }
    }

    #[test]
    fn test_indeterminate_never_all_selected() {
        for flags in [[false, false], [true, false], [false, true], [true, true]] {
            let items = items(&flags);
            assert!(!(is_indeterminate(&items) && is_all_selected(&items)));
        }
    }

    #[test]
    fn test_section_state_markers() {
        assert_eq!(section_state(&items(&[false])), SectionState::Unselected);
        assert_eq!(SectionState::Unselected.marker(), "[ ]");
        assert_eq!(SectionState::AllSelected.marker(), "[x]");
    }
}
