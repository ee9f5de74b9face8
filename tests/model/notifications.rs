use parking_lot::Mutex;
use std::sync::Arc;

use secmap::{AddressSpaceModel, ChangeEvent, SelectionRange, SelectionTracker};

use crate::common::fixtures::{config, pe_like};

#[test]
fn model_and_selection_notify_independently() {
    let model: AddressSpaceModel = AddressSpaceModel::new(&config());
    let mut selection = SelectionTracker::new(&config());

    let events = Arc::new(Mutex::new(Vec::new()));
    let model_events = events.clone();
    let selection_events = events.clone();
    let _m = model.subscribe(move |ev| model_events.lock().push(("model", *ev)));
    let _s = selection.subscribe(move |ev| selection_events.lock().push(("selection", *ev)));

    model.load(pe_like());
    assert!(selection.set_start_from_address(0x400, &model));
    model.clear();

    assert_eq!(
        *events.lock(),
        vec![
            ("model", ChangeEvent::LayoutReplaced),
            (
                "selection",
                ChangeEvent::SelectionChanged(SelectionRange::new(0x400, 0x1400))
            ),
            ("model", ChangeEvent::LayoutCleared),
        ]
    );
}

#[test]
fn callbacks_see_the_new_state() {
    let model = Arc::new(AddressSpaceModel::new(&config()));
    let observed = Arc::new(Mutex::new(None));
    let m = model.clone();
    let store = observed.clone();
    let _sub = model.subscribe(move |_| {
        *store.lock() = Some(m.section_count());
    });
    model.load(pe_like());
    assert_eq!(*observed.lock(), Some(3));
}

#[test]
fn dropped_subscription_stops_delivery() {
    let model: AddressSpaceModel = AddressSpaceModel::new(&config());
    let hits = Arc::new(Mutex::new(0));
    let count = hits.clone();
    let sub = model.subscribe(move |_| *count.lock() += 1);
    model.load(pe_like());
    drop(sub);
    model.load(pe_like());
    assert_eq!(*hits.lock(), 1);
}

#[test]
fn layout_swap_is_visible_across_threads() {
    let model = Arc::new(AddressSpaceModel::new(&config()));
    model.load(pe_like());
    let reader = {
        let model = model.clone();
        std::thread::spawn(move || {
            for _ in 0..1000 {
                let pinned = model.pin();
                // Each pinned view is internally consistent.
                let count = pinned.section_count();
                assert!(count == 0 || count == 3);
                if count == 3 {
                    assert_eq!(pinned.total_units(secmap::ViewMode::Raw), 0x12);
                }
            }
        })
    };
    for _ in 0..100 {
        model.load(secmap::ExecutableLayout::new(0x1000, 0x1000, 0x200, 0x1000));
        model.load(pe_like());
    }
    reader.join().unwrap();
}
