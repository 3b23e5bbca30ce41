//! Merging a freshly fetched item list into an existing store.
//!
//! Reconciliation builds a new store whose item set is exactly the raw input,
//! while items that already existed keep their previous selection flag and
//! payload. A server refresh therefore never clobbers edits in progress.
//!
//! ```text
//! previous store ──┐
//!                  ├──► index (section → item → &Item) ──► new store
//! raw item list ───┘
//! ```
//!
//! The previous store is indexed once per call, so a reconciliation runs in
//! expected O(N) over the previous and new item counts.

use std::sync::Arc;

use pd_core::{FxHashMap, fx_hash_map_with_capacity, fx_hash_set_with_capacity};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::item::{Item, RawItem};
use crate::section::Section;
use crate::store::SelectionStore;

/// Section used for raw items that do not name one.
///
/// The name is fixed so that repeated reconciliations of unsectioned input keep
/// landing in the same section, which keeps retention working for them.
pub const UNNAMED_SECTION: &str = "unnamed_section";

/// Counts describing what one reconciliation did.
///
/// # Examples
///
/// ```
/// use pd_select::{RawItem, SelectionStore};
///
/// let store: SelectionStore<()> = SelectionStore::from_raw(vec![RawItem::new("s", "a")]);
/// let (_, summary) = store.reconcile_with_summary(vec![
///     RawItem::new("s", "a"),
///     RawItem::new("s", "b"),
/// ]);
/// assert_eq!(summary.retained, 1);
/// assert_eq!(summary.added, 1);
/// assert_eq!(summary.dropped, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReconcileSummary {
    /// Items that existed before and kept their previous state.
    pub retained: usize,
    /// Items created from the raw input.
    pub added: usize,
    /// Previous items absent from the raw input.
    pub dropped: usize,
    /// Raw entries ignored because of an empty name or a repeated identity.
    pub skipped: usize,
}

/// Previous items keyed by section name, then item name.
type PreviousIndex<'a, P> = FxHashMap<&'a str, FxHashMap<&'a str, &'a Item<P>>>;

fn index_previous<P>(store: &SelectionStore<P>) -> PreviousIndex<'_, P> {
    let mut index: PreviousIndex<'_, P> = fx_hash_map_with_capacity(store.len());
    for section in store.sections() {
        let items = index
            .entry(section.name())
            .or_insert_with(|| fx_hash_map_with_capacity(section.len()));
        for item in section.items() {
            items.insert(item.name.as_str(), item);
        }
    }
    index
}

impl<P: Clone + Default> SelectionStore<P> {
    /// Builds a store from a raw list, as a reconciliation against nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use pd_select::{RawItem, SelectionStore, UNNAMED_SECTION};
    ///
    /// let store: SelectionStore<u8> = SelectionStore::from_raw(vec![
    ///     RawItem::new("art", "r/pics").with_selected(true),
    ///     RawItem::unsectioned("r/misc"),
    /// ]);
    /// assert_eq!(store.len(), 2);
    /// assert!(store.item(UNNAMED_SECTION, "r/misc").is_some());
    /// ```
    #[must_use]
    pub fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = RawItem<P>>,
    {
        Self::new().reconcile(raw)
    }

    /// Produces a new store holding exactly the items of `raw`.
    ///
    /// Items whose (section, name) identity exists in `self` keep their current
    /// flag and payload; the raw entry's `selected` and `properties` only apply
    /// to items that are new. Sections appear in the order their first item is
    /// met in `raw`.
    ///
    /// Entries with an empty name, and entries repeating an identity already
    /// taken earlier in the same input, are skipped.
    #[must_use]
    pub fn reconcile<I>(&self, raw: I) -> Self
    where
        I: IntoIterator<Item = RawItem<P>>,
    {
        self.reconcile_with_summary(raw).0
    }

    /// Same as [`reconcile`](Self::reconcile), also returning what changed.
    pub fn reconcile_with_summary<I>(&self, raw: I) -> (Self, ReconcileSummary)
    where
        I: IntoIterator<Item = RawItem<P>>,
    {
        let previous = index_previous(self);
        let raw = raw.into_iter();

        let mut summary = ReconcileSummary::default();
        let mut sections: Vec<Section<P>> = Vec::new();
        let mut positions: FxHashMap<String, usize> = fx_hash_map_with_capacity(self.len());
        let mut seen = fx_hash_set_with_capacity(raw.size_hint().0);

        for entry in raw {
            if entry.name.is_empty() {
                warn!(section = ?entry.section, "Skipping raw item with empty name");
                summary.skipped += 1;
                continue;
            }

            let section_name = match entry.section {
                Some(name) if !name.is_empty() => name,
                _ => UNNAMED_SECTION.to_owned(),
            };

            if !seen.insert((section_name.clone(), entry.name.clone())) {
                warn!(section = %section_name, item = %entry.name, "Skipping repeated raw item");
                summary.skipped += 1;
                continue;
            }

            let item = match previous
                .get(section_name.as_str())
                .and_then(|items| items.get(entry.name.as_str()))
            {
                Some(existing) => {
                    summary.retained += 1;
                    Item::clone(existing)
                }
                None => {
                    summary.added += 1;
                    Item {
                        name: entry.name,
                        selected: entry.selected.unwrap_or(false),
                        properties: entry.properties.unwrap_or_default(),
                    }
                }
            };

            match positions.get(section_name.as_str()) {
                Some(&index) => sections[index].items_mut().push(item),
                None => {
                    positions.insert(section_name.clone(), sections.len());
                    sections.push(Section::new(section_name, vec![item]));
                }
            }
        }

        summary.dropped = self.item_count().saturating_sub(summary.retained);

        debug!(
            sections = sections.len(),
            retained = summary.retained,
            added = summary.added,
            dropped = summary.dropped,
            skipped = summary.skipped,
            "Reconciled selection store"
        );

        let store = Self {
            sections: sections.into_iter().map(Arc::new).collect(),
        };
        (store, summary)
    }
}
