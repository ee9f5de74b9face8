use secmap::config::TrackConfig;
use secmap::track::{click, hover, Marker};
use secmap::{AddressSpaceModel, SelectionRange, SelectionTracker, TrackGeometry, TrackSnapshot, ViewMode};

use crate::common::fixtures::{config, pe_like};

// 181 rows over 18 raw units: ten rows per unit boundary.
fn geometry() -> TrackGeometry {
    TrackGeometry::new(0, 181)
}

#[test]
fn raw_snapshot_places_everything() {
    let model = AddressSpaceModel::with_layout(pe_like(), &config());
    let selection = SelectionTracker::with_page(0x1000, &config());
    let snapshot = TrackSnapshot::capture(
        &model,
        &selection,
        ViewMode::Raw,
        geometry(),
        &TrackConfig::default(),
    );

    assert_eq!(snapshot.total_units, 18);
    assert_eq!(snapshot.unit_size, 0x200);
    assert!(snapshot.grid_lines.is_empty());

    let placed: Vec<_> = snapshot
        .bands
        .iter()
        .map(|b| (b.label.as_deref(), b.y, b.height))
        .collect();
    assert_eq!(
        placed,
        vec![
            (Some("[.text]"), 20, 81),
            (Some("[.data]"), 100, 11),
            (Some("[.rsrc]"), 110, 71),
        ]
    );

    assert_eq!(
        snapshot.entry_point,
        Some(Marker {
            address: 0x410,
            unit: 2.03125,
            y: 20
        })
    );
    assert_eq!(snapshot.header_end.map(|m| (m.address, m.y)), Some((0x1f8, 9)));

    let span = snapshot.selection.unwrap();
    assert_eq!(span.range, SelectionRange::new(0x1000, 0x2000));
    assert_eq!((span.y1, span.y2), (80, 161));
}

#[test]
fn grid_follows_config() {
    let model = AddressSpaceModel::with_layout(pe_like(), &config());
    let selection = SelectionTracker::new(&config());
    let track = TrackConfig {
        show_grid: true,
        max_grid_lines: 4,
        show_names: false,
        ..TrackConfig::default()
    };
    let snapshot = TrackSnapshot::capture(&model, &selection, ViewMode::Raw, geometry(), &track);
    assert_eq!(snapshot.grid_lines, vec![0, 10, 20, 30]);
    assert!(snapshot.bands.iter().all(|b| b.label.is_none()));
    assert_eq!(snapshot.selection, None);
}

#[test]
fn unloaded_snapshot_is_empty() {
    let model: AddressSpaceModel = AddressSpaceModel::new(&config());
    let selection = SelectionTracker::with_page(0, &config());
    let snapshot = TrackSnapshot::capture(
        &model,
        &selection,
        ViewMode::Virtual,
        geometry(),
        &TrackConfig::default(),
    );
    assert!(snapshot.is_empty());
    assert!(snapshot.bands.is_empty());
    assert_eq!(snapshot.entry_point, None);
}

#[test]
fn snapshot_serializes() {
    let model = AddressSpaceModel::with_layout(pe_like(), &config());
    let selection = SelectionTracker::new(&config());
    let json = TrackSnapshot::capture(
        &model,
        &selection,
        ViewMode::Virtual,
        geometry(),
        &TrackConfig::default(),
    )
    .to_json()
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_units"], 4);
    assert_eq!(value["bands"].as_array().map(Vec::len), Some(3));
    assert!(value["selection"].is_null());
}

#[test]
fn hover_then_click() {
    let model = AddressSpaceModel::with_layout(pe_like(), &config());
    let mut selection = SelectionTracker::new(&config());

    let info = hover(25, ViewMode::Raw, geometry(), &model).unwrap();
    assert_eq!(info.unit, 2);
    assert_eq!(info.tooltip(), "400\n[.text]");

    // Virtual unit 2 is turned into an address with the raw unit size.
    assert_eq!(
        click(100, ViewMode::Virtual, geometry(), &model, &mut selection),
        Some(0x400)
    );
    assert_eq!(selection.range(), SelectionRange::new(0x400, 0x1400));

    assert_eq!(click(-1, ViewMode::Raw, geometry(), &model, &mut selection), None);
}
