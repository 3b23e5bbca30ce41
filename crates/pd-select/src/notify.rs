//! Change notification on top of the pure store transitions.
//!
//! [`SelectionHandle`] is the single writer for one store. It keeps the current
//! [`Snapshot`] and at most one [`Subscriber`]. Each mutation runs the pure
//! transition, swaps in the resulting snapshot and hands it to the subscriber
//! before returning.
//!
//! # Invariants
//!
//! 1. The version increases by exactly one per successful mutation.
//! 2. A failed mutation republishes the current snapshot with the same version.
//! 3. The subscriber never receives a lower version after a higher one.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use pd_select::{RawItem, SelectionHandle, SelectionStore, Snapshot};
//!
//! let store: SelectionStore<()> = SelectionStore::from_raw(vec![RawItem::new("s", "a")]);
//! let mut handle = SelectionHandle::new(store);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! handle.subscribe(move |snapshot: &Snapshot<()>| sink.borrow_mut().push(snapshot.version()));
//!
//! handle.select_item("s", "a").unwrap();
//! assert!(handle.select_item("s", "missing").is_err());
//! assert_eq!(*seen.borrow(), [1, 1]);
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::command::Command;
use crate::error::SelectError;
use crate::item::{Item, RawItem};
use crate::reconcile::ReconcileSummary;
use crate::section::Section;
use crate::store::SelectionStore;

/// An immutable, versioned view of the store.
///
/// Cloning a snapshot is cheap; it shares the underlying store.
#[derive(Debug, Serialize)]
pub struct Snapshot<P> {
    version: u64,
    #[serde(rename = "sections")]
    store: Arc<SelectionStore<P>>,
}

impl<P> Snapshot<P> {
    /// Returns the snapshot version. The initial snapshot is version 0.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the store captured by this snapshot.
    #[inline]
    #[must_use]
    pub fn store(&self) -> &SelectionStore<P> {
        &self.store
    }

    /// Returns `true` if both snapshots share the same store allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

impl<P> Clone for Snapshot<P> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            store: Arc::clone(&self.store),
        }
    }
}

impl<P> Deref for Snapshot<P> {
    type Target = SelectionStore<P>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Receives every snapshot published by a [`SelectionHandle`].
///
/// Implemented for any `FnMut(&Snapshot<P>)` closure.
pub trait Subscriber<P> {
    /// Called synchronously from inside the mutating call.
    fn notify(&mut self, snapshot: &Snapshot<P>);
}

impl<P, F> Subscriber<P> for F
where
    F: FnMut(&Snapshot<P>),
{
    fn notify(&mut self, snapshot: &Snapshot<P>) {
        self(snapshot);
    }
}

/// Boxed subscriber as stored in the handle's single slot.
pub type BoxSubscriber<P> = Box<dyn Subscriber<P>>;

/// Single-writer owner of a selection store with one subscriber slot.
pub struct SelectionHandle<P> {
    current: Snapshot<P>,
    subscriber: Option<BoxSubscriber<P>>,
}

impl<P> fmt::Debug for SelectionHandle<P>
where
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionHandle")
            .field("current", &self.current)
            .field("subscribed", &self.subscriber.is_some())
            .finish()
    }
}

impl<P> Default for SelectionHandle<P> {
    fn default() -> Self {
        Self::new(SelectionStore::new())
    }
}

impl<P> SelectionHandle<P> {
    /// Wraps a store as snapshot version 0, with no subscriber.
    #[must_use]
    pub fn new(store: SelectionStore<P>) -> Self {
        Self {
            current: Snapshot {
                version: 0,
                store: Arc::new(store),
            },
            subscriber: None,
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<P> {
        self.current.clone()
    }

    /// Returns the current store.
    #[inline]
    #[must_use]
    pub fn store(&self) -> &SelectionStore<P> {
        &self.current.store
    }

    /// Returns the current snapshot version.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.current.version
    }

    /// Installs `subscriber`, returning the one it replaces.
    ///
    /// The new subscriber is not called until the next publication.
    pub fn subscribe<S>(&mut self, subscriber: S) -> Option<BoxSubscriber<P>>
    where
        S: Subscriber<P> + 'static,
    {
        self.subscriber.replace(Box::new(subscriber))
    }

    /// Removes and returns the current subscriber.
    pub fn unsubscribe(&mut self) -> Option<BoxSubscriber<P>> {
        self.subscriber.take()
    }

    /// Returns `true` if a subscriber is installed.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscriber.is_some()
    }

    fn publish(&mut self) {
        if let Some(subscriber) = self.subscriber.as_mut() {
            subscriber.notify(&self.current);
        }
    }

    fn advance(&mut self, op: &'static str, store: SelectionStore<P>) {
        self.current = Snapshot {
            version: self.current.version + 1,
            store: Arc::new(store),
        };
        debug!(op, version = self.current.version, "Published snapshot");
        self.publish();
    }

    fn commit(
        &mut self,
        op: &'static str,
        result: Result<SelectionStore<P>, SelectError>,
    ) -> Result<(), SelectError> {
        match result {
            Ok(store) => {
                self.advance(op, store);
                Ok(())
            }
            Err(error) => {
                debug!(op, %error, version = self.current.version, "Mutation rejected");
                self.publish();
                Err(error)
            }
        }
    }
}

impl<P: Clone> SelectionHandle<P> {
    /// See [`SelectionStore::select_item`].
    pub fn select_item(&mut self, section: &str, item: &str) -> Result<(), SelectError> {
        let result = self.store().select_item(section, item);
        self.commit("select_item", result)
    }

    /// See [`SelectionStore::set_item_selected`].
    pub fn set_item_selected(
        &mut self,
        section: &str,
        item: &str,
        selected: bool,
    ) -> Result<(), SelectError> {
        let result = self.store().set_item_selected(section, item, selected);
        self.commit("set_item_selected", result)
    }

    /// See [`SelectionStore::set_item_properties`].
    pub fn set_item_properties(
        &mut self,
        section: &str,
        item: &str,
        properties: P,
    ) -> Result<(), SelectError> {
        let result = self.store().set_item_properties(section, item, properties);
        self.commit("set_item_properties", result)
    }

    /// See [`SelectionStore::select_all_in_section`].
    pub fn select_all_in_section(&mut self, section: &str) -> Result<(), SelectError> {
        let result = self.store().select_all_in_section(section);
        self.commit("select_all_in_section", result)
    }

    /// See [`SelectionStore::select_all`].
    pub fn select_all(&mut self) {
        let store = self.store().select_all();
        self.advance("select_all", store);
    }

    /// See [`SelectionStore::add_item`].
    pub fn add_item(
        &mut self,
        section: &str,
        item: &str,
        properties: P,
    ) -> Result<(), SelectError> {
        let result = self.store().add_item(section, item, properties);
        self.commit("add_item", result)
    }

    /// See [`SelectionStore::remove_item`].
    pub fn remove_item(&mut self, section: &str, item: &str) -> Result<(), SelectError> {
        let result = self.store().remove_item(section, item);
        self.commit("remove_item", result)
    }

    /// See [`SelectionStore::rename_section`].
    pub fn rename_section(&mut self, old: &str, new: &str) -> Result<(), SelectError> {
        let result = self.store().rename_section(old, new);
        self.commit("rename_section", result)
    }

    /// See [`SelectionStore::rename_item`].
    pub fn rename_item(&mut self, section: &str, old: &str, new: &str) -> Result<(), SelectError> {
        let result = self.store().rename_item(section, old, new);
        self.commit("rename_item", result)
    }

    /// See [`SelectionStore::set_section_items`].
    pub fn set_section_items(
        &mut self,
        section: &str,
        items: Vec<Item<P>>,
    ) -> Result<(), SelectError> {
        let result = self.store().set_section_items(section, items);
        self.commit("set_section_items", result)
    }

    /// See [`SelectionStore::set_sections`].
    pub fn set_sections(&mut self, sections: Vec<Section<P>>) -> Result<(), SelectError> {
        let result = self.store().set_sections(sections);
        self.commit("set_sections", result)
    }
}

impl<P: Clone + Default> SelectionHandle<P> {
    /// Reconciles the current store against `raw` and publishes the result.
    ///
    /// See [`SelectionStore::reconcile`].
    pub fn reconcile<I>(&mut self, raw: I) -> ReconcileSummary
    where
        I: IntoIterator<Item = RawItem<P>>,
    {
        let (store, summary) = self.store().reconcile_with_summary(raw);
        self.advance("reconcile", store);
        summary
    }

    /// Applies one [`Command`], publishing exactly once.
    ///
    /// # Errors
    ///
    /// Returns the [`SelectError`] of the underlying transition, in which case
    /// the unchanged snapshot is republished.
    pub fn apply(&mut self, command: Command<P>) -> Result<(), SelectError> {
        let op = command.name();
        let result = command.apply_to(self.store());
        self.commit(op, result)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type Log = Rc<RefCell<Vec<Snapshot<u32>>>>;

    fn handle_with_log() -> (SelectionHandle<u32>, Log) {
        let store = SelectionStore::from_raw(vec![
            RawItem::new("s", "a"),
            RawItem::new("s", "b"),
        ]);
        let mut handle = SelectionHandle::new(store);
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        handle.subscribe(move |snapshot: &Snapshot<u32>| sink.borrow_mut().push(snapshot.clone()));
        (handle, log)
    }

    fn versions(log: &Log) -> Vec<u64> {
        log.borrow().iter().map(Snapshot::version).collect()
    }

    #[test]
    fn test_success_publishes_new_version_before_return() {
        let (mut handle, log) = handle_with_log();
        handle.select_item("s", "a").unwrap();
        assert_eq!(versions(&log), [1]);
        let published = log.borrow()[0].clone();
        assert!(published.ptr_eq(&handle.snapshot()));
        assert!(published.item("s", "a").unwrap().selected);
    }

    #[test]
    fn test_failure_republishes_unchanged_snapshot() {
        let (mut handle, log) = handle_with_log();
        let before = handle.snapshot();
        let err = handle.remove_item("s", "zzz").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(handle.version(), 0);
        assert_eq!(versions(&log), [0]);
        assert!(log.borrow()[0].ptr_eq(&before));
    }

    #[test]
    fn test_versions_strictly_ordered() {
        let (mut handle, log) = handle_with_log();
        handle.select_all_in_section("s").unwrap();
        handle.rename_section("s", "s").unwrap();
        assert!(handle.add_item("s", "a", 1).unwrap_err().is_duplicate());
        handle.reconcile(vec![RawItem::new("s", "a")]);
        handle.select_all();
        assert_eq!(versions(&log), [1, 2, 2, 3, 4]);
        let all = versions(&log);
        assert!(all.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_old_snapshots_stay_valid() {
        let (mut handle, _log) = handle_with_log();
        let before = handle.snapshot();
        handle.select_all_in_section("s").unwrap();
        assert_eq!(before.selected_count(), 0);
        assert_eq!(handle.store().selected_count(), 2);
    }

    #[test]
    fn test_single_subscriber_slot() {
        let (mut handle, log) = handle_with_log();
        let other: Log = Rc::default();
        let sink = Rc::clone(&other);
        let previous = handle.subscribe(move |snapshot: &Snapshot<u32>| {
            sink.borrow_mut().push(snapshot.clone());
        });
        assert!(previous.is_some());

        handle.select_item("s", "b").unwrap();
        assert!(log.borrow().is_empty());
        assert_eq!(other.borrow().len(), 1);

        assert!(handle.unsubscribe().is_some());
        assert!(!handle.is_subscribed());
        handle.select_item("s", "b").unwrap();
        assert_eq!(other.borrow().len(), 1);
    }

    #[test]
    fn test_reconcile_returns_summary_and_publishes() {
        let (mut handle, log) = handle_with_log();
        handle.set_item_properties("s", "a", 5).unwrap();
        let summary = handle.reconcile(vec![RawItem::new("s", "a").with_properties(9)]);
        assert_eq!(summary.retained, 1);
        assert_eq!(summary.dropped, 1);
        assert_eq!(handle.store().item("s", "a").unwrap().properties, 5);
        assert_eq!(versions(&log), [1, 2]);
    }

    #[test]
    fn test_set_sections_publishes_once_or_republishes_on_collision() {
        let (mut handle, log) = handle_with_log();
        handle
            .set_sections(vec![Section::new("t", vec![Item::new("x", 1)])])
            .unwrap();
        assert_eq!(handle.store().len(), 1);
        assert!(handle.store().section("s").is_none());

        let err = handle
            .set_sections(vec![Section::new("u", Vec::new()), Section::new("u", Vec::new())])
            .unwrap_err();
        assert!(err.is_duplicate());
        assert!(handle.store().contains(&crate::ItemKey::new("t", "x")));
        assert_eq!(versions(&log), [1, 1]);
    }

    #[test]
    fn test_snapshot_serializes_version_and_sections() {
        let handle: SelectionHandle<u32> =
            SelectionHandle::new(SelectionStore::from_raw(vec![RawItem::new("s", "a")]));
        insta::assert_json_snapshot!(handle.snapshot(), @r#"
        {
          "version": 0,
          "sections": [
            {
              "name": "s",
              "items": [
                {
                  "name": "a",
                  "selected": false,
                  "properties": 0
                }
              ]
            }
          ]
        }
        "#);
    }
}
