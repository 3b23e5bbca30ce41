//! End-to-end behavior of the selection store through its public API.

use std::cell::RefCell;
use std::rc::Rc;

use pd_select::{
    Command, ItemKey, RawItem, SectionState, SelectError, SelectionHandle, SelectionStore,
    Snapshot,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Props {
    x: u32,
}

fn raw(section: &str, item: &str, x: u32, selected: bool) -> RawItem<Props> {
    RawItem::new(section, item)
        .with_properties(Props { x })
        .with_selected(selected)
}

fn flags(store: &SelectionStore<Props>, section: &str) -> Vec<bool> {
    store
        .section(section)
        .map(|s| s.items().iter().map(|item| item.selected).collect())
        .unwrap_or_default()
}

#[test]
fn select_all_truth_table() {
    for (before, after) in [
        ([false, false], [true, true]),
        ([true, true], [false, false]),
        ([true, false], [true, true]),
        ([false, true], [true, true]),
    ] {
        let store = SelectionStore::from_raw(vec![
            raw("s", "A", 0, before[0]),
            raw("s", "B", 0, before[1]),
        ]);
        let store = store.select_all_in_section("s").unwrap();
        assert_eq!(flags(&store, "s"), after, "from {before:?}");
    }
}

#[test]
fn empty_section_edge_case() {
    let store = SelectionStore::from_raw(vec![raw("s", "A", 0, false)])
        .remove_item("s", "A")
        .unwrap();
    let section = store.section("s").unwrap();
    assert!(section.is_empty());
    assert!(section.is_all_selected());
    assert!(!section.is_indeterminate());
    assert!(section.is_any_selected());
    assert_eq!(section.state(), SectionState::AllSelected);
}

#[test]
fn refresh_keeps_user_edits() {
    let store = SelectionStore::from_raw(vec![raw("Sec1", "itemA", 1, true)]);
    let store = store.reconcile(vec![raw("Sec1", "itemA", 2, false)]);
    let item = store.item("Sec1", "itemA").unwrap();
    assert!(item.selected);
    assert_eq!(item.properties, Props { x: 1 });
}

#[test]
fn refresh_adds_and_drops_items() {
    let store =
        SelectionStore::from_raw(vec![raw("Sec1", "A", 0, true), raw("Sec1", "B", 0, true)]);
    let store = store.reconcile(vec![raw("Sec1", "A", 0, false), raw("Sec1", "C", 0, false)]);

    assert_eq!(store.section("Sec1").unwrap().len(), 2);
    assert!(store.item("Sec1", "B").is_none());
    assert!(!store.item("Sec1", "C").unwrap().selected);
    assert_eq!(store.checked_keys(), [ItemKey::new("Sec1", "A")]);
}

#[test]
fn refresh_from_own_state_is_idempotent() {
    let store = SelectionStore::from_raw(vec![
        raw("one", "a", 1, true),
        raw("one", "b", 2, false),
        raw("two", "c", 3, false),
    ])
    .select_all_in_section("two")
    .unwrap();
    assert_eq!(store.reconcile(store.to_raw()), store);
}

#[test]
fn remove_then_add_same_identity() {
    let store = SelectionStore::from_raw(vec![raw("s", "a", 1, true)]);
    let store = store
        .remove_item("s", "a")
        .and_then(|s| s.add_item("s", "a", Props { x: 2 }))
        .unwrap();
    let section = store.section("s").unwrap();
    assert_eq!(section.len(), 1);
    let item = section.item("a").unwrap();
    assert!(!item.selected);
    assert_eq!(item.properties, Props { x: 2 });
}

#[test]
fn rename_onto_existing_section_is_rejected() {
    let mut handle = SelectionHandle::new(SelectionStore::from_raw(vec![
        raw("one", "a", 1, true),
        raw("two", "b", 2, false),
    ]));
    let before = handle.snapshot();

    let err = handle.rename_section("one", "two").unwrap_err();
    assert_eq!(err, SelectError::duplicate_section("two"));
    assert_eq!(handle.store(), before.store());
    assert_eq!(handle.version(), before.version());
}

#[test]
fn scripted_session_with_refresh() {
    let mut handle = SelectionHandle::new(SelectionStore::from_raw(vec![
        raw("art", "r/pics", 0, false),
        raw("art", "r/art", 0, false),
        raw("tech", "r/rust", 0, false),
    ]));

    let published: Rc<RefCell<Vec<u64>>> = Rc::default();
    let sink = Rc::clone(&published);
    handle.subscribe(move |snapshot: &Snapshot<Props>| {
        sink.borrow_mut().push(snapshot.version());
    });

    let script: Vec<Command<Props>> = serde_json::from_str(
        r#"[
            {"op": "select_all_in_section", "section": "art"},
            {"op": "set_item_properties", "section": "art", "item": "r/pics",
             "properties": {"x": 7}},
            {"op": "select_item", "section": "tech", "item": "r/go"},
            {"op": "select_item", "section": "tech", "item": "r/rust"}
        ]"#,
    )
    .unwrap();
    let failures = script
        .into_iter()
        .filter_map(|command| handle.apply(command).err())
        .count();
    assert_eq!(failures, 1);

    handle.reconcile(vec![
        raw("art", "r/pics", 0, false),
        raw("tech", "r/rust", 0, false),
        raw("tech", "r/zig", 0, true),
    ]);

    let store = handle.store();
    assert_eq!(
        store.checked_keys(),
        [
            ItemKey::new("art", "r/pics"),
            ItemKey::new("tech", "r/rust"),
            ItemKey::new("tech", "r/zig"),
        ]
    );
    assert_eq!(store.item("art", "r/pics").unwrap().properties, Props { x: 7 });
    assert_eq!(*published.borrow(), [1, 2, 2, 3, 4]);
}
