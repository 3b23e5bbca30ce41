//! Hierarchical tri-state selection store for the postdeck workspace.
//!
//! The store holds sections of items, each item carrying a `selected` flag and
//! a caller-defined payload `P`. It provides:
//!
//! - [`SelectionStore`]: an immutable value with pure transitions
//!   (`&self` in, new store out)
//! - [`SelectionStore::reconcile`]: merging a fresh item list while keeping the
//!   selection and payload of items that survive the refresh
//! - [`query`]: derived section state (all / none / indeterminate), always
//!   computed from the item flags
//! - [`SelectionHandle`]: single-writer wrapper publishing a versioned
//!   [`Snapshot`] to one [`Subscriber`] after every mutation
//! - [`Command`]: serializable form of every mutation
//!
//! # Examples
//!
//! ```
//! use pd_select::{RawItem, SelectionHandle, SelectionStore};
//!
//! let store: SelectionStore<String> = SelectionStore::from_raw(vec![
//!     RawItem::new("art", "r/pics"),
//!     RawItem::new("art", "r/art"),
//! ]);
//! let mut handle = SelectionHandle::new(store);
//!
//! handle.select_item("art", "r/pics").unwrap();
//! handle.set_item_properties("art", "r/pics", "my title".to_owned()).unwrap();
//!
//! // A refresh keeps the edits on items that are still present.
//! handle.reconcile(vec![RawItem::new("art", "r/pics"), RawItem::new("art", "r/photos")]);
//!
//! let item = handle.store().item("art", "r/pics").unwrap();
//! assert!(item.selected);
//! assert_eq!(item.properties, "my title");
//! assert!(handle.store().item("art", "r/art").is_none());
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod item;
pub mod notify;
pub mod query;
pub mod reconcile;
pub mod section;
pub mod store;

pub use command::Command;
pub use error::SelectError;
pub use item::{Item, ItemKey, RawItem};
pub use notify::{BoxSubscriber, SelectionHandle, Snapshot, Subscriber};
pub use query::{SectionState, is_all_selected, is_any_selected, is_indeterminate, section_state};
pub use reconcile::{ReconcileSummary, UNNAMED_SECTION};
pub use section::Section;
pub use store::SelectionStore;
